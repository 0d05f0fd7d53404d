//! The audit instruction template.
//!
//! One versioned template, one sentinel. The prompt is written in the same
//! language the report is delivered in; the structural contract it describes
//! must stay aligned with [`crate::schema::analysis_schema`].

/// Bumped whenever the instruction wording changes in a way that can alter
/// the shape or strictness of the model output.
pub const PROMPT_VERSION: &str = "v1";

/// Exact string the model is instructed to place in data fields it could not
/// verify. In `basicInfo.businessName` it signals that the profile itself was
/// not found and the whole analysis must be rejected.
pub const NOT_FOUND_SENTINEL: &str = "No se encontró información";

/// Title used for a grounding citation that arrives without one.
pub const FALLBACK_SOURCE_TITLE: &str = "Fuente externa";

/// Build the grounded-audit prompt for an already-canonical handle.
///
/// The handle must come out of the input normalizer: lowercase, no `@`, no
/// URL fragments.
pub fn analysis_prompt(handle: &str) -> String {
    format!(
        r#"INSTRUCCIÓN DE BÚSQUEDA PROFESIONAL Y ESTRICTA:
Actúa como un Analista de Datos de Redes Sociales de alto nivel. Tu objetivo es analizar el perfil de Instagram EXACTO: https://www.instagram.com/{handle}/

PASOS OBLIGATORIOS PARA EVITAR ERRORES DE IDENTIDAD:
1. Utiliza la búsqueda web en tiempo real para localizar la URL específica 'instagram.com/{handle}'.
2. VERIFICACIÓN DE IDENTIDAD: Antes de extraer datos, confirma que el 'handle' en los resultados de búsqueda sea exactamente "{handle}". No aceptes perfiles similares, fan pages, o cuentas con guiones/puntos adicionales.
3. Si encuentras un perfil con un nombre parecido pero el handle NO es "{handle}", ignóralo completamente.
4. Si el perfil no devuelve información pública indexada o es privado, responde con un JSON indicando "{sentinel}" en los campos de datos, pero NO inventes información de otros negocios.

ESTRUCTURA DE ANÁLISIS:
- ANALIZA: Nombre oficial, Bio, Categoría, Servicios específicos mencionados en sus posts o bio.
- MÉTRICAS: Estima el engagement basado en la interacción visible en fragmentos de búsqueda.
- CONTENIDO: Identifica si usa más Reels, Carruseles o fotos fijas. Tono de marca.
- COMPETENCIA: Encuentra 3 competidores reales que operen en el mismo sector y escala que @{handle}.
- ESTRATEGIA: Genera un plan de mejora basado en las debilidades reales detectadas.

REGLA DE ORO: Si no estás 100% seguro de que los datos pertenecen a @{handle}, marca el campo como "{sentinel}"."#,
        handle = handle,
        sentinel = NOT_FOUND_SENTINEL,
    )
}
