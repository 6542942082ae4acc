use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use cmd_annotate_oracle::{OracleRegistry, ProcessOracle, load_config, watch_oracle};
use cmd_annotate_pipeline::{
    HtmlRenderer, MarkupRenderer, annotate_block, annotate_text, catalog_entries,
};
use url::Url;

/// Output format for catalog dumps.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "cmd-annotate")]
#[command(about = "Annotate shell command lines with oracle-backed semantic markup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Annotate command lines in a markdown file or stdin.
    Annotate(AnnotateArgs),
    /// Dump the command catalog of every configured oracle.
    Commands(CommandsArgs),
    /// Describe one argument vector against one configured oracle.
    Describe(DescribeArgs),
    /// Re-annotate a file whenever an oracle binary changes.
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
struct AnnotateArgs {
    /// Path to the YAML oracle configuration.
    #[arg(long)]
    config: PathBuf,
    /// Input file; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output file; stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Treat the whole input as command lines instead of scanning fenced
    /// shell blocks.
    #[arg(long)]
    plain: bool,
}

#[derive(Debug, Args)]
struct CommandsArgs {
    /// Path to the YAML oracle configuration.
    #[arg(long)]
    config: PathBuf,
    /// Output format (default: json).
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct DescribeArgs {
    /// Path to the YAML oracle configuration.
    #[arg(long)]
    config: PathBuf,
    /// Configured CLI name to address.
    #[arg(long)]
    cli: String,
    /// Argument vector to describe (excluding the binary name).
    #[arg(required = true)]
    argv: Vec<String>,
}

#[derive(Debug, Args)]
struct WatchArgs {
    /// Path to the YAML oracle configuration.
    #[arg(long)]
    config: PathBuf,
    /// Input file to re-annotate on change.
    #[arg(long)]
    input: PathBuf,
    /// Output file to rewrite on change.
    #[arg(long)]
    output: PathBuf,
    /// Treat the whole input as command lines instead of scanning fenced
    /// shell blocks.
    #[arg(long)]
    plain: bool,
    /// Debounce window for binary-change events, in milliseconds.
    #[arg(long, default_value_t = 500)]
    debounce_ms: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Annotate(args) => run_annotate(args),
        Command::Commands(args) => run_commands(args),
        Command::Describe(args) => run_describe(args),
        Command::Watch(args) => run_watch(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn build_registry(config: &PathBuf) -> Result<OracleRegistry, String> {
    let config = load_config(config).map_err(|e| e.to_string())?;
    OracleRegistry::from_config(&config).map_err(|e| e.to_string())
}

fn run_annotate(args: AnnotateArgs) -> Result<(), String> {
    let registry = build_registry(&args.config)?;

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            text
        }
    };

    let annotated = render(&text, args.plain, &registry, &HtmlRenderer);
    write_output(args.output.as_deref(), &annotated)
}

fn run_commands(args: CommandsArgs) -> Result<(), String> {
    let registry = build_registry(&args.config)?;
    let entries = catalog_entries(&registry);

    let raw = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&entries)
            .map_err(|err| format!("Failed to serialize catalog: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&entries)
            .map_err(|err| format!("Failed to serialize catalog: {err}"))?,
    };
    println!("{raw}");
    Ok(())
}

fn run_describe(args: DescribeArgs) -> Result<(), String> {
    let registry = build_registry(&args.config)?;
    let entry = registry
        .get(&args.cli)
        .ok_or_else(|| format!("No oracle configured for '{}'", args.cli))?;

    let result = entry
        .oracle
        .describe(&args.argv)
        .map_err(|e| e.to_string())?;
    let raw = serde_json::to_string_pretty(&result)
        .map_err(|err| format!("Failed to serialize describe result: {err}"))?;
    println!("{raw}");
    Ok(())
}

fn run_watch(args: WatchArgs) -> Result<(), String> {
    let config = load_config(&args.config).map_err(|e| e.to_string())?;
    let debounce = Duration::from_millis(args.debounce_ms);

    let mut registry = OracleRegistry::new();
    let mut watchers = Vec::new();
    let (tx, rx) = mpsc::channel::<String>();

    for (name, cli) in &config.clis {
        let oracle = Arc::new(ProcessOracle::new(&cli.path).map_err(|e| e.to_string())?);

        let base_url = cli
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|err| format!("Invalid base URL for '{name}': {err}"))?;

        let changed = tx.clone();
        let cli_name = name.clone();
        oracle.subscribe(move || {
            let _ = changed.send(cli_name.clone());
        });

        watchers.push(watch_oracle(Arc::clone(&oracle), debounce).map_err(|e| e.to_string())?);
        registry.insert(name, oracle, base_url);
    }
    drop(tx);

    let render_once = |registry: &OracleRegistry| -> Result<(), String> {
        let text = fs::read_to_string(&args.input)
            .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
        let annotated = render(&text, args.plain, registry, &HtmlRenderer);
        fs::write(&args.output, annotated)
            .map_err(|err| format!("Failed to write '{}': {err}", args.output.display()))
    };

    render_once(&registry)?;
    println!(
        "Watching {} oracle binar{}; press Ctrl-C to stop.",
        registry.len(),
        if registry.len() == 1 { "y" } else { "ies" }
    );

    while let Ok(name) = rx.recv() {
        println!("Oracle '{name}' changed; re-annotating.");
        render_once(&registry)?;
    }

    Ok(())
}

fn render(
    text: &str,
    plain: bool,
    registry: &OracleRegistry,
    renderer: &dyn MarkupRenderer,
) -> String {
    if plain {
        annotate_text(text, registry, renderer)
    } else {
        annotate_markdown(text, registry, renderer)
    }
}

fn write_output(output: Option<&std::path::Path>, text: &str) -> Result<(), String> {
    match output {
        Some(path) => fs::write(path, text)
            .map_err(|err| format!("Failed to write '{}': {err}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

/// Annotates lines inside fenced shell blocks, leaving everything else
/// untouched. An unterminated block at end of input passes through as-is.
fn annotate_markdown(
    text: &str,
    registry: &OracleRegistry,
    renderer: &dyn MarkupRenderer,
) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut in_shell_block = false;

    for line in text.split('\n') {
        let trimmed = line.trim_start();
        if in_shell_block {
            if trimmed.starts_with("```") {
                out.extend(annotate_block(&block, registry, renderer));
                block.clear();
                in_shell_block = false;
                out.push(line.to_string());
            } else {
                block.push(line);
            }
        } else {
            if is_shell_fence(trimmed) {
                in_shell_block = true;
            }
            out.push(line.to_string());
        }
    }

    out.extend(block.iter().map(|line| line.to_string()));
    out.join("\n")
}

fn is_shell_fence(line: &str) -> bool {
    let Some(info) = line.strip_prefix("```") else {
        return false;
    };
    matches!(info.trim(), "bash" | "sh" | "shell")
}

#[cfg(test)]
mod tests {
    use super::{annotate_markdown, is_shell_fence};
    use cmd_annotate_oracle::OracleRegistry;
    use cmd_annotate_pipeline::HtmlRenderer;

    #[test]
    fn test_shell_fence_detection() {
        assert!(is_shell_fence("```bash"));
        assert!(is_shell_fence("```sh"));
        assert!(is_shell_fence("``` shell "));
        assert!(!is_shell_fence("```rust"));
        assert!(!is_shell_fence("```"));
        assert!(!is_shell_fence("plain prose"));
    }

    #[test]
    fn test_markdown_outside_blocks_is_untouched() {
        let registry = OracleRegistry::new();
        let text = "# Title\n\n```bash\ngit status\n```\n\nprose git status\n";
        assert_eq!(annotate_markdown(text, &registry, &HtmlRenderer), text);
    }

    #[test]
    fn test_unterminated_block_passes_through() {
        let registry = OracleRegistry::new();
        let text = "```bash\ngit status";
        assert_eq!(annotate_markdown(text, &registry, &HtmlRenderer), text);
    }

    #[test]
    fn test_non_shell_fences_are_skipped() {
        let registry = OracleRegistry::new();
        let text = "```rust\nfn main() {}\n```\n";
        assert_eq!(annotate_markdown(text, &registry, &HtmlRenderer), text);
    }
}
