use anyhow::Context;
use smartqr::configuration::get_downloader_config;
use smartqr::downloader::VideoFetcher;
use smartqr::telemetry::{get_subscriber, init_subscriber};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Keep the prompt clean: logs only when RUST_LOG asks for them.
    let subscriber = get_subscriber("fetch_video".into(), "off".into(), std::io::stderr);
    init_subscriber(subscriber);

    let config = get_downloader_config().context("Failed to read configuration")?;
    let fetcher = VideoFetcher::from_config(&config);

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"Enter YouTube video or Shorts URL: ")
        .await?;
    stdout.flush().await?;

    let mut url = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut url)
        .await
        .context("Failed to read URL from stdin")?;
    let url = url.trim();

    println!("Downloading: {url}");
    match fetcher.download(url).await {
        Ok(()) => println!("Download completed!"),
        Err(e) => println!("Error: {e}\nPlease check the URL or try updating yt-dlp."),
    }

    Ok(())
}
