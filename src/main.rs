use std::env;
use std::fs;
use std::time::Duration;

use clap::Parser;

use replygen::config::AppConfig;
use replygen::extract::ExtractMode;
use replygen::generate::ReplyGenerator;
use replygen::prompt::ReplyRequest;
use replygen::server::serve;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Run the server
    #[arg(short, long, action)]
    serve: bool,

    /// Set the server host address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Set the server port
    #[arg(long, default_value = "8080")]
    port: String,

    /// Generate a reply for an email read from a file and print it
    #[arg(long)]
    email_file: Option<String>,

    /// Desired tone for the generated reply
    #[arg(long, default_value = "")]
    tone: String,

    /// Log incoming payloads and outgoing provider requests
    #[arg(long, action)]
    log_payloads: bool,

    /// Return the raw provider body instead of a fixed sentinel when the
    /// response has no candidates
    #[arg(long, action)]
    debug_extract: bool,

    /// Provider request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let api_key = env::var("GEMINI_API_KEY").expect("Missing env var GEMINI_API_KEY");
    let api_base_url = env::var("GEMINI_API_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
    let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());

    let mut config = AppConfig::new(&api_base_url, &api_key, &model);
    config.request_timeout = Duration::from_secs(args.timeout);
    config.log_payloads = args.log_payloads;
    config.extract_mode = if args.debug_extract {
        ExtractMode::Debug
    } else {
        ExtractMode::Strict
    };

    if let Some(email_file) = args.email_file {
        let email_content = fs::read_to_string(&email_file)?;
        let request = ReplyRequest {
            email_content,
            tone: args.tone,
        };
        let generator = ReplyGenerator::new(&config);
        match generator.generate(&request).await {
            Ok(text) => println!("{}", text),
            Err(err) => eprintln!("{}", err.user_message()),
        }
    }

    if args.serve {
        serve(args.host, args.port, config).await?;
    }

    Ok(())
}
