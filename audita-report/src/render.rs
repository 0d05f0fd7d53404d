//! HTML rendering of the audit report.
//!
//! Five sections plus the sources list, in the order the report is read:
//! profile, content, competitor benchmark, opportunities, proposal. All
//! model-authored text is escaped before interpolation.

use audita_analysis::types::{AnalysisResult, Priority};
use chrono::Local;

const EMPTY_FIELD_LABEL: &str = "No disponible";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn value_or_placeholder(text: &str) -> String {
    if text.trim().is_empty() {
        EMPTY_FIELD_LABEL.to_string()
    } else {
        escape(text)
    }
}

fn joined_or_placeholder(items: &[String]) -> String {
    if items.is_empty() {
        EMPTY_FIELD_LABEL.to_string()
    } else {
        escape(&items.join(", "))
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Alta => "Alta",
        Priority::Media => "Media",
        Priority::Baja => "Baja",
    }
}

/// Render the full report surface for a completed analysis.
pub fn render_report_html(analysis: &AnalysisResult) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let info = &analysis.basic_info;
    let metrics = &analysis.content_metrics;
    let diagnosis = &analysis.diagnosis;
    let proposal = &analysis.commercial_proposal;

    html.push_str("<!doctype html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Auditoría Digital de Perfil — {}</title>\n</head>\n<body>\n",
        value_or_placeholder(&info.business_name)
    ));

    // Header: score + executive summary.
    html.push_str("<header>\n<h1>Auditoría Digital de Perfil</h1>\n");
    html.push_str(&format!(
        "<p>Análisis estratégico para {} (@{})</p>\n",
        value_or_placeholder(&info.business_name),
        escape(&info.handle)
    ));
    html.push_str(&format!(
        "<p>Salud Digital: <strong>{:.1}/10</strong></p>\n<blockquote>{}</blockquote>\n",
        diagnosis.overall_score,
        value_or_placeholder(&diagnosis.executive_summary)
    ));
    html.push_str(&format!(
        "<p>Fecha: {}</p>\n</header>\n",
        Local::now().format("%Y-%m-%d")
    ));

    // Profile.
    html.push_str("<section id=\"perfil\">\n<h2>Diagnóstico del Perfil</h2>\n<dl>\n");
    for (label, value) in [
        ("Categoría", &info.category),
        ("Biografía", &info.bio),
        ("Ubicación", &info.location),
        ("Audiencia objetivo", &info.target_audience),
        ("Propuesta de Valor", &info.unique_value_prop),
    ] {
        html.push_str(&format!(
            "<dt>{label}</dt><dd>{}</dd>\n",
            value_or_placeholder(value)
        ));
    }
    html.push_str(&format!(
        "<dt>Servicios</dt><dd>{}</dd>\n",
        joined_or_placeholder(&info.services)
    ));
    html.push_str(&format!(
        "<dt>Sitio Web</dt><dd>{}</dd>\n",
        value_or_placeholder(&info.contact.website)
    ));
    html.push_str(&format!(
        "<dt>Teléfono</dt><dd>{}</dd>\n</dl>\n</section>\n",
        value_or_placeholder(info.contact.phone.as_deref().unwrap_or(""))
    ));

    // Content.
    html.push_str("<section id=\"contenido\">\n<h2>Contenido</h2>\n<ul>\n");
    html.push_str(&format!(
        "<li>Engagement: {}</li>\n<li>Frecuencia: {}</li>\n<li>Consistencia de marca: {:.1}/10</li>\n<li>Tono: {}</li>\n",
        value_or_placeholder(&metrics.engagement_level),
        value_or_placeholder(&metrics.post_frequency),
        metrics.brand_consistency,
        value_or_placeholder(&metrics.tone),
    ));
    html.push_str("</ul>\n<h3>Mix de Contenido</h3>\n<ul>\n");
    for share in &metrics.content_types {
        html.push_str(&format!(
            "<li>{}: {:.0}%</li>\n",
            escape(&share.kind),
            share.percentage
        ));
    }
    html.push_str("</ul>\n</section>\n");

    // Competitor benchmark.
    html.push_str("<section id=\"benchmark\">\n<h2>Benchmark de Competencia</h2>\n<table>\n");
    html.push_str(
        "<tr><th>Competidor</th><th>Presencia</th><th>Consistencia</th><th>Profesionalismo</th><th>Engagement</th></tr>\n",
    );
    for competitor in &analysis.competitors {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td></tr>\n",
            escape(&competitor.name),
            competitor.metrics.presence,
            competitor.metrics.consistency,
            competitor.metrics.professionalism,
            competitor.metrics.engagement,
        ));
    }
    html.push_str("</table>\n</section>\n");

    // Opportunities.
    html.push_str("<section id=\"mejoras\">\n<h2>Oportunidades de Mejora</h2>\n");
    for opportunity in &diagnosis.opportunities {
        html.push_str(&format!(
            "<article><h3>{} — Prioridad {}</h3><p>{}</p></article>\n",
            escape(&opportunity.area),
            priority_label(opportunity.priority),
            value_or_placeholder(&opportunity.advice),
        ));
    }
    html.push_str("</section>\n");

    // Proposal.
    html.push_str("<section id=\"estrategia\">\n<h2>Propuesta Comercial</h2>\n");
    html.push_str(&format!(
        "<p>{}</p>\n<ul>\n",
        value_or_placeholder(&proposal.introduction)
    ));
    for (label, value) in [
        ("Ecosistema Web", &proposal.solution.web_design),
        ("Automatización", &proposal.solution.chatbot),
        ("Agendamiento", &proposal.solution.booking_system),
        ("Optimización", &proposal.solution.social_optimization),
    ] {
        html.push_str(&format!(
            "<li><strong>{label}:</strong> {}</li>\n",
            value_or_placeholder(value)
        ));
    }
    html.push_str("</ul>\n<h3>Beneficios Proyectados</h3>\n<ul>\n");
    for benefit in &proposal.projected_benefits {
        html.push_str(&format!(
            "<li>{}: {}</li>\n",
            escape(&benefit.metric),
            escape(&benefit.improvement)
        ));
    }
    html.push_str("</ul>\n</section>\n");

    // Sources.
    html.push_str("<section id=\"fuentes\">\n<h2>Fuentes de Datos</h2>\n<ul>\n");
    for source in &analysis.sources {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape(&source.uri),
            escape(&source.title)
        ));
    }
    html.push_str("</ul>\n</section>\n</body>\n</html>\n");

    html
}
