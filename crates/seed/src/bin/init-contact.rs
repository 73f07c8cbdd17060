use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    motoserwis_seed::run("init-contact", motoserwis_seed::CONTACT_PAGES).await
}
