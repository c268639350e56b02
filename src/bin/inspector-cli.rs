use clap::{Parser, Subcommand};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "inspector-cli")]
#[command(about = "Poke a running http-inspector from the command line", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the headers the server received
    Headers,
    /// Show the address the server sees
    Ip,
    /// Show the user agent the server sees
    UserAgent,
    /// Ask for one of the given comma-separated status codes
    Status { codes: String },
    /// Exercise conditional requests against an etag
    Etag {
        etag: String,
        #[arg(long)]
        if_none_match: Option<String>,
        #[arg(long)]
        if_match: Option<String>,
    },
    /// Echo a request back
    Anything {
        #[arg(default_value = "")]
        path: String,
        #[arg(short = 'X', long, default_value = "GET")]
        method: Method,
        /// JSON body to send
        #[arg(short, long)]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request: RequestBuilder = match cli.command {
        Commands::Headers => client.get(format!("{base}/headers")),
        Commands::Ip => client.get(format!("{base}/ip")),
        Commands::UserAgent => client.get(format!("{base}/user_agent")),
        Commands::Status { codes } => client.get(format!("{base}/status/{codes}")),
        Commands::Etag {
            etag,
            if_none_match,
            if_match,
        } => {
            let mut request = client.get(format!("{base}/etag/{etag}"));
            if let Some(value) = if_none_match {
                request = request.header("If-None-Match", value);
            }
            if let Some(value) = if_match {
                request = request.header("If-Match", value);
            }
            request
        }
        Commands::Anything { path, method, data } => {
            let path = path.trim_start_matches('/');
            let mut request = client.request(method, format!("{base}/anything/{path}"));
            if let Some(data) = data {
                request = request
                    .header("Content-Type", "application/json")
                    .body(data);
            }
            request
        }
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", res.status());
    for cookie in res.headers().get_all("set-cookie") {
        println!("Set-Cookie: {}", cookie.to_str().unwrap_or("<binary>"));
    }

    let text = res.text().await?;
    if text.is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{text}"),
    }
    Ok(())
}
