#[tokio::main]
async fn main() -> anyhow::Result<()> {
    profilescout_server::start().await
}
