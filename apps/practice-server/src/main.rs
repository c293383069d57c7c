#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_practice_server::run().await
}
