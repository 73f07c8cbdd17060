use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    motoserwis_seed::run("init-content", motoserwis_seed::CONTENT_PAGES).await
}
