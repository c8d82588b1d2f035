use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use zcode_search::core::ServiceRegistry;
use zcode_search::kernel::services::adapters::{
    available_file_types, get_storage_dir, load_settings, HistoryStore, JsonFileStore,
    SearchEngine,
};
use zcode_search::kernel::services::ports::{
    Direction, Document, MatchLocation, SearchFilters, Settings,
};
use zcode_search::kernel::SearchPanel;

mod logging;

#[derive(Parser, Debug)]
#[command(name = "zcode-search", version, about = "Search files like the editor's search panel")]
struct Cli {
    /// Query text (regex when --regex is set)
    query: String,

    /// Files to search
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[arg(long = "case")]
    case_sensitive: bool,

    #[arg(long = "word")]
    whole_word: bool,

    #[arg(long)]
    regex: bool,

    #[arg(long = "no-comments")]
    exclude_comments: bool,

    /// Only print positions, not the matching lines
    #[arg(long = "no-content")]
    no_content: bool,

    /// Only search files with this extension (repeatable)
    #[arg(long = "type", value_name = "EXT")]
    file_types: Vec<String>,

    /// Save query and filters as a named preset
    #[arg(long, value_name = "NAME")]
    save: Option<String>,

    /// Print recent queries after searching
    #[arg(long)]
    history: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn filters(&self, defaults: &SearchFilters) -> SearchFilters {
        let mut filters = defaults.clone();
        filters.case_sensitive |= self.case_sensitive;
        filters.whole_word |= self.whole_word;
        filters.use_regex |= self.regex;
        filters.exclude_comments |= self.exclude_comments;
        if self.no_content {
            filters.include_content = false;
        }
        filters
            .file_types
            .extend(self.file_types.iter().map(|t| t.trim_start_matches('.').to_lowercase()));
        filters
    }
}

fn read_documents(files: &[PathBuf]) -> Vec<Document> {
    files
        .iter()
        .filter_map(|path| match std::fs::read_to_string(path) {
            Ok(content) => Some(Document::new(path.display().to_string(), content)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                None
            }
        })
        .collect()
}

fn register_services(
    registry: &mut ServiceRegistry,
    settings: &Settings,
    storage_dir: PathBuf,
) -> zcode_search::core::service::Result<()> {
    registry.register(SearchEngine::with_settings(&settings.search))?;
    registry.register(HistoryStore::load(
        Box::new(JsonFileStore::new(storage_dir)),
        settings.search.history_limit,
    ))?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logging_guard = logging::init(cli.verbose);
    if let Some(guard) = &logging_guard {
        tracing::debug!(log_dir = %guard.log_dir().display(), "logging to file");
    }

    let settings: Settings = load_settings().unwrap_or_default();
    let storage_dir = settings
        .search
        .storage_dir
        .clone()
        .or_else(get_storage_dir)
        .unwrap_or_else(|| std::env::temp_dir().join("zcode").join("search"));

    let mut registry = ServiceRegistry::new();
    if let Err(e) = register_services(&mut registry, &settings, storage_dir) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    let (Ok(engine), Ok(history)) = (
        registry.require::<SearchEngine>(),
        registry.require::<HistoryStore>(),
    ) else {
        eprintln!("error: search services unavailable");
        return ExitCode::FAILURE;
    };

    let documents = read_documents(&cli.files);
    tracing::debug!(types = ?available_file_types(&documents), "documents loaded");

    let mut panel = SearchPanel::new(cli.filters(&settings.search.default_filters));
    panel.set_query(cli.query.clone());
    panel.set_sink(|location: &MatchLocation| {
        tracing::debug!(
            filename = %location.filename,
            line = location.line,
            column = location.column,
            "match selected"
        );
    });

    if !panel.run(&documents, engine, Some(history)) {
        eprintln!("error: empty query");
        return ExitCode::FAILURE;
    }

    if let Some(err) = &panel.outcome().regex_fallback {
        eprintln!("warning: {err}; searched for the literal text instead");
    }

    panel.expand_all();
    for (filename, matches, _) in panel.groups() {
        println!("{filename}");
        for m in matches {
            match m.highlight() {
                Some((before, matched, after)) => println!(
                    "  {}:{} [{}] {}[{}]{}",
                    m.line,
                    m.column,
                    m.kind,
                    before.trim_start(),
                    matched,
                    after.trim_end()
                ),
                None => println!("  {}:{} [{}] len {}", m.line, m.column, m.kind, m.match_length),
            }
        }
    }
    // 第一个匹配作为跳转目标
    panel.navigate(Direction::Next);
    println!("{}", panel.outcome().summary());

    if let Some(name) = &cli.save {
        if panel.save_snippet(name, history) {
            println!("saved search as {name:?}");
        }
    }

    if cli.history {
        println!();
        for entry in history.list_history() {
            println!("{:>15}  {}", entry.timestamp, entry.query);
        }
    }

    if panel.matches().is_empty() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
