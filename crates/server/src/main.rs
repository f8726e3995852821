#[tokio::main]
async fn main() -> anyhow::Result<()> {
    listify_server::start().await
}
