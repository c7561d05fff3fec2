use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use hopethread_core::{
    analyze_with_mode, is_hope_thread, rank_by_empathy, recommend, resolve_config, AnalyzerConfig,
    AnalyzerMode, EmotionAnalyzer, EmotionLexicon, PatternJournal, SimilarState,
};
use hopethread_schema::{FeedPost, PostContext, SupportType};

#[derive(Parser)]
#[command(name = "hopethread", version, about = "hopethread emotion and empathy scoring")]
struct Cli {
    #[arg(long, help = "Analyzer config file (defaults to ./hopethread.yaml when present)")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Analyze text (argument or stdin) and print the result as JSON")]
    Analyze {
        #[arg(help = "Text to analyze; read from stdin when omitted")]
        text: Option<String>,
        #[arg(long, value_enum, help = "Override the configured analyzer mode")]
        mode: Option<AnalyzerMode>,
        #[arg(long, help = "Pretty-print JSON")]
        pretty: bool,
    },
    #[command(about = "Print the keyword lexicon as JSON")]
    Lexicon,
    #[command(about = "Validate the analyzer config")]
    Validate,
    #[command(about = "Rank a JSONL file of posts by empathy potential")]
    Rank {
        #[arg(help = "JSONL file with {\"id\", \"authorId\", \"content\"} per line")]
        file: PathBuf,
        #[arg(
            long,
            value_delimiter = ',',
            help = "Only recommend posts sharing one of these emotions"
        )]
        emotions: Vec<String>,
        #[arg(long, help = "Leave out posts by this author")]
        exclude_author: Option<String>,
        #[arg(long, help = "Only posts calling for this support type")]
        support: Option<SupportType>,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    #[command(about = "Summarize a user's emotional trends from a JSONL post history")]
    Trends {
        #[arg(help = "JSONL file with {\"userId\", \"content\", \"at\"} per line")]
        file: PathBuf,
        #[arg(long, help = "User to summarize")]
        user: String,
    },
    #[command(about = "Find recorded states closest to the emotions in some text")]
    Similar {
        #[arg(help = "JSONL file with {\"userId\", \"content\", \"at\"} per line")]
        file: PathBuf,
        #[arg(help = "Text to match; read from stdin when omitted")]
        text: Option<String>,
        #[arg(long, help = "Only states recorded with this context")]
        context: Option<PostContext>,
        #[arg(long, help = "Maximum results (defaults to the configured similar_limit)")]
        limit: Option<usize>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostInput {
    id: String,
    author_id: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryInput {
    user_id: String,
    content: String,
    #[serde(default)]
    at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankedLine<'a> {
    id: &'a str,
    primary_emotion: &'a str,
    empathy_potential_score: f64,
    hope_thread: bool,
    crisis: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let config = resolve_config(cli.config.as_deref(), &cwd)?;

    match command {
        Commands::Validate => {
            println!(
                "Config valid. mode={}, hope_thread_threshold={}, history_window_days={}",
                config.mode.as_str(),
                config.hope_thread_threshold,
                config.history_window_days
            );
        }
        Commands::Lexicon => {
            let json = serde_json::to_string_pretty(EmotionLexicon::standard())?;
            println!("{json}");
        }
        Commands::Analyze { text, mode, pretty } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let mode = mode.unwrap_or(config.mode);
            let analysis = analyze_with_mode(EmotionLexicon::standard(), mode, &text);
            tracing::debug!(
                mode = mode.as_str(),
                primary = analysis.primary_emotion(),
                empathy = analysis.empathy_potential_score(),
                "analysis complete"
            );
            let json = if pretty {
                serde_json::to_string_pretty(&analysis)?
            } else {
                serde_json::to_string(&analysis)?
            };
            println!("{json}");
        }
        Commands::Rank {
            file,
            emotions,
            exclude_author,
            support,
            limit,
        } => {
            let posts = load_feed(&file)?;
            let ranked = rank_feed(posts, &emotions, exclude_author.as_deref(), support, limit);
            print_ranked(&ranked, &config, &mut std::io::stdout().lock())?;
        }
        Commands::Trends { file, user } => {
            let journal = PatternJournal::new(config.history_window_days);
            replay_history(&file, &journal)?;
            let trends = journal.trends(&user);
            println!("{}", serde_json::to_string_pretty(&trends)?);
        }
        Commands::Similar {
            file,
            text,
            context,
            limit,
        } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let journal = PatternJournal::new(config.history_window_days);
            replay_history(&file, &journal)?;
            let limit = limit.unwrap_or(config.similar_limit);
            let states = similar_states(&journal, &text, context, limit);
            let mut out = std::io::stdout().lock();
            for state in &states {
                writeln!(out, "{}", serde_json::to_string(state)?)?;
            }
        }
    }

    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("reading text from stdin")?;
    Ok(text)
}

fn read_jsonl<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid record", path.display(), index + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

fn load_feed(path: &Path) -> Result<Vec<FeedPost>> {
    let analyzer = EmotionAnalyzer::default();
    let posts: Vec<PostInput> = read_jsonl(path)?;
    tracing::info!(count = posts.len(), path = %path.display(), "analyzing feed");
    Ok(posts
        .into_iter()
        .map(|post| FeedPost {
            signal: analyzer.analyze(&post.content).signal(),
            id: post.id,
            author_id: post.author_id,
        })
        .collect())
}

fn replay_history(path: &Path, journal: &PatternJournal) -> Result<()> {
    let analyzer = EmotionAnalyzer::default();
    let rows: Vec<HistoryInput> = read_jsonl(path)?;
    if rows.is_empty() {
        return Err(anyhow!("{} has no history records", path.display()));
    }
    for row in rows {
        let analysis = analyzer.analyze(&row.content);
        journal.record_at(&row.user_id, &analysis, row.at.unwrap_or_else(Utc::now));
    }
    Ok(())
}

/// Plain empathy ranking, or emotion-targeted recommendation when
/// `emotions` is non-empty. Author and support filters apply to both.
fn rank_feed(
    posts: Vec<FeedPost>,
    emotions: &[String],
    exclude_author: Option<&str>,
    support: Option<SupportType>,
    limit: usize,
) -> Vec<FeedPost> {
    let mut posts: Vec<FeedPost> = posts
        .into_iter()
        .filter(|post| support.map_or(true, |support| post.signal.support_type == support))
        .collect();
    if !emotions.is_empty() {
        return recommend(&posts, emotions, exclude_author, limit);
    }
    if let Some(author) = exclude_author {
        posts.retain(|post| post.author_id != author);
    }
    rank_by_empathy(&mut posts);
    posts.truncate(limit);
    posts
}

fn similar_states(
    journal: &PatternJournal,
    text: &str,
    context: Option<PostContext>,
    limit: usize,
) -> Vec<SimilarState> {
    let analysis = EmotionAnalyzer::default().analyze(text);
    let Some(context) = context else {
        return journal.find_similar(&analysis, limit);
    };
    let mut states = journal.find_similar(&analysis, journal.len());
    states.retain(|state| state.pattern.context == context);
    states.truncate(limit);
    states
}

fn print_ranked(posts: &[FeedPost], config: &AnalyzerConfig, out: &mut impl Write) -> Result<()> {
    for post in posts {
        let line = RankedLine {
            id: &post.id,
            primary_emotion: &post.signal.primary_emotion,
            empathy_potential_score: post.signal.empathy_potential_score,
            hope_thread: is_hope_thread(&post.signal, config.hope_thread_threshold),
            crisis: post.signal.has_crisis,
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    }
    Ok(())
}
