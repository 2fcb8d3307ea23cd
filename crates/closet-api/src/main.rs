#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    closet_api::run().await
}
