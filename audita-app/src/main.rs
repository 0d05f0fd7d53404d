use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use audita_analysis::{Analyzer, AuditSession};
use audita_common::observability::{init_logging, LogConfig};
use audita_config::{AuditaConfigLoader, ProviderConfig};
use audita_llm::gemini::GeminiClient;
use audita_report::{render_report_html, report_filename, HtmlFileExporter, ReportExporter};
use clap::Parser;

/// Grounded Instagram business audits from the command line.
#[derive(Debug, Parser)]
#[command(name = "audita", version)]
struct Cli {
    /// Profile to audit: a handle, an @handle, or a full profile URL.
    input: String,

    /// Configuration file (YAML). Environment variables with the AUDITA_
    /// prefix override it.
    #[arg(long, default_value = "audita.yaml")]
    config: PathBuf,

    /// Directory for exported report surfaces.
    #[arg(long, default_value = "reports")]
    out_dir: PathBuf,

    /// Export the rendered report after a completed analysis.
    #[arg(long)]
    export: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins), fail fast on a missing credential.
    let mut loader = AuditaConfigLoader::new();
    if cli.config.exists() {
        loader = loader.with_file(&cli.config);
    }
    let cfg = loader.load()?;
    cfg.validate()?;

    init_logging(LogConfig::default())?;

    let ProviderConfig::Gemini {
        api_key,
        model,
        endpoint,
    } = cfg.provider;
    let client = GeminiClient::with_base_url(api_key, model, &endpoint)?
        .with_request_timeout(Duration::from_secs(cfg.analysis.timeout_secs));
    let analyzer = Analyzer::new(client, cfg.analysis);

    let mut session = AuditSession::new();
    session.begin()?;
    println!("Buscando el perfil en la web...");

    let analysis = match analyzer.analyze(&cli.input).await {
        Ok(analysis) => {
            session.complete()?;
            analysis
        }
        Err(err) => {
            session.fail()?;
            tracing::error!(error = %err, "analysis.failed");
            eprintln!("No pudimos completar el análisis: {err}");
            std::process::exit(1);
        }
    };

    println!(
        "Salud Digital: {:.1}/10 — {}",
        analysis.diagnosis.overall_score, analysis.basic_info.business_name
    );
    println!("\"{}\"", analysis.diagnosis.executive_summary);
    println!("Competidores analizados: {}", analysis.competitors.len());
    println!("Fuentes de datos:");
    for source in &analysis.sources {
        println!("  • {} — {}", source.title, source.uri);
    }

    if cli.export {
        session.begin_export()?;
        let exporter = HtmlFileExporter::new(&cli.out_dir);
        let filename = report_filename(&analysis.basic_info.business_name, "html");
        let surface = render_report_html(&analysis);

        // Export failures are isolated: the analysis above stays valid.
        match exporter.export(&surface, &filename).await {
            Ok(path) => println!("Reporte exportado: {}", path.display()),
            Err(err) => eprintln!("No se pudo exportar el reporte: {err}"),
        }
        session.finish_export()?;
    }

    Ok(())
}
