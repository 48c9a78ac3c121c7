use crate::client::Client;
use crate::error::ReportError;
use crate::output::ReportWriter;
use crate::report::ReportRequest;
use log::info;
use std::path::PathBuf;

/// Fetch a report and write it out. Nothing is written unless the API
/// answered with a report body.
pub async fn download_report(
    client: &Client,
    writer: &ReportWriter,
    request: &ReportRequest,
) -> Result<PathBuf, ReportError> {
    info!("Requesting {} report for {}", request.kind, request.date);
    let body = client.fetch_report(request).await?;
    writer.write(request, &body)
}
