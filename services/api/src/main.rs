use matchvita_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("matchvita: {err}");
        std::process::exit(1);
    }
}
