#[tokio::main]
async fn main() {
    let code = resumekit_cli::run().await;
    std::process::exit(code);
}
