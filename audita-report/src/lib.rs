//! Report surface and export collaborator seam.
//!
//! [`render::render_report_html`] turns a validated analysis into the
//! document surface; [`export::ReportExporter`] is the boundary behind which
//! a PDF-producing collaborator lives. Export failures never invalidate the
//! completed analysis they were fed.
pub mod export;
pub mod render;

pub use export::{report_filename, HtmlFileExporter, ReportExporter};
pub use render::render_report_html;
