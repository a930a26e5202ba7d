//! Interactive Console
//!
//! Terminal front-end: one line of input is either a chat message or a
//! `/command`. Chat replies arrive asynchronously so the prompt stays usable
//! while a request is outstanding; sends made meanwhile are ignored. A reply
//! still pending at `/quit` or end of input is awaited before exiting.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::backend::{AnalysisBackend, ClientError};
use crate::chat::{
    ChatSession, RejectReason, SendOutcome, OPTIMISATION_PROMPTS, SUGGESTIONS, WELCOME_MESSAGE,
};
use crate::dashboard::{build_cards, DashboardLoader, DashboardState, DASHBOARD_ERROR_MESSAGE};
use crate::graphs::{self, GraphError, GraphKind};
use crate::render::render_message;
use crate::sections::{Section, SectionSwitcher, UnknownSection};

const HELP: &str = "\
Type a message to ask the assistant, or use a command:
  /tab <charts|optimisation|assistant>  switch section
  /dashboard                            reload the dashboard
  /graph <costs|workloads|efficiency>   download a quick-analysis graph
  /suggest <n>                          send welcome suggestion n
  /prompt <n>                           send optimisation prompt n
  /history                              show the transcript
  /clear                                start a new conversation
  /help                                 show this help
  /quit                                 exit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat(String),
    Tab(String),
    Dashboard,
    Graph(String),
    Suggest(usize),
    Prompt(usize),
    History,
    Clear,
    Help,
    Quit,
}

impl Command {
    /// Parse a line; `None` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>, ConsoleError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Some(Command::Chat(line.to_string())));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "tab" | "section" => Command::Tab(required(arg, "section")?.to_string()),
            "dashboard" | "reload" | "retry" => Command::Dashboard,
            "graph" => Command::Graph(required(arg, "graph type")?.to_string()),
            "suggest" => Command::Suggest(one_based(arg)?),
            "prompt" => Command::Prompt(one_based(arg)?),
            "history" => Command::History,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ConsoleError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn required<'a>(arg: &'a str, what: &'static str) -> Result<&'a str, ConsoleError> {
    if arg.is_empty() {
        Err(ConsoleError::MissingArgument(what))
    } else {
        Ok(arg)
    }
}

fn one_based(arg: &str) -> Result<usize, ConsoleError> {
    match required(arg, "number")?.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ConsoleError::InvalidNumber(arg.to_string())),
    }
}

fn suggestion(index: usize) -> Result<&'static str, ConsoleError> {
    SUGGESTIONS
        .get(index)
        .copied()
        .ok_or_else(|| ConsoleError::InvalidNumber((index + 1).to_string()))
}

fn optimisation_prompt(index: usize) -> Result<&'static str, ConsoleError> {
    OPTIMISATION_PROMPTS
        .get(index)
        .map(|(_, prompt)| *prompt)
        .ok_or_else(|| ConsoleError::InvalidNumber((index + 1).to_string()))
}

/// Text a command sends to the assistant; `None` for other commands
fn outgoing_text(command: &Command) -> Option<Result<String, ConsoleError>> {
    match command {
        Command::Chat(text) => Some(Ok(text.clone())),
        Command::Suggest(index) => Some(suggestion(*index).map(str::to_string)),
        Command::Prompt(index) => Some(optimisation_prompt(*index).map(str::to_string)),
        _ => None,
    }
}

/// Errors surfaced to the console user
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Unknown command: /{0} (try /help)")]
    UnknownCommand(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Expected a number from the list, got {0:?}")]
    InvalidNumber(String),

    #[error(transparent)]
    Section(#[from] UnknownSection),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Backend error: {0}")]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text produced by one command
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

/// Interactive session state
pub struct Console {
    backend: Arc<dyn AnalysisBackend>,
    sections: SectionSwitcher,
    chat: Arc<ChatSession>,
    dashboard: DashboardLoader,
    graph_dir: PathBuf,
    open_graphs: bool,
}

impl Console {
    pub fn new(backend: Arc<dyn AnalysisBackend>, graph_dir: impl Into<PathBuf>) -> Self {
        Self {
            chat: Arc::new(ChatSession::new(Arc::clone(&backend))),
            dashboard: DashboardLoader::new(Arc::clone(&backend)),
            sections: SectionSwitcher::default(),
            backend,
            graph_dir: graph_dir.into(),
            open_graphs: false,
        }
    }

    /// Open downloaded graphs in the system viewer
    pub fn open_graphs(mut self, open: bool) -> Self {
        self.open_graphs = open;
        self
    }

    pub fn active_section(&self) -> Section {
        self.sections.active()
    }

    pub fn chat(&self) -> &Arc<ChatSession> {
        &self.chat
    }

    /// Run one command to completion
    pub async fn execute(&mut self, command: Command) -> Result<Reply, ConsoleError> {
        match command {
            Command::Chat(text) => Ok(self.send_chat(&text).await),
            Command::Suggest(index) => Ok(self.send_chat(suggestion(index)?).await),
            Command::Prompt(index) => Ok(self.send_chat(optimisation_prompt(index)?).await),
            Command::Tab(name) => {
                let section = self.sections.activate_named(&name)?;
                Ok(Reply::text(self.render_section(section).await))
            }
            Command::Dashboard => {
                self.sections.activate(Section::Charts);
                self.dashboard.refresh().await;
                Ok(Reply::text(self.render_section(Section::Charts).await))
            }
            Command::Graph(kind) => {
                let kind: GraphKind = kind.parse()?;
                let path = self.download_graph(kind).await?;
                Ok(Reply::text(format!("{} saved to {}", kind.label(), path.display())))
            }
            Command::History => Ok(Reply::text(self.render_transcript().await)),
            Command::Clear => {
                if self.chat.clear().await {
                    Ok(Reply::text("Conversation cleared."))
                } else {
                    Ok(Reply::text(
                        "Still waiting for the previous reply; conversation not cleared.",
                    ))
                }
            }
            Command::Help => Ok(Reply::text(HELP)),
            Command::Quit => Ok(Reply {
                output: String::new(),
                quit: true,
            }),
        }
    }

    async fn send_chat(&mut self, text: &str) -> Reply {
        self.sections.activate(Section::Assistant);
        let outcome = self.chat.send(text).await;
        Reply::text(describe_outcome(&outcome, &self.graph_dir))
    }

    /// Render a section, loading the dashboard on first view
    pub async fn render_section(&self, section: Section) -> String {
        let body = match section {
            Section::Charts => {
                if self.dashboard.state().await == DashboardState::Loading {
                    self.dashboard.refresh().await;
                }
                self.render_dashboard().await
            }
            Section::Optimisation => render_optimisation(),
            Section::Assistant => self.render_transcript().await,
        };

        let tabs: Vec<String> = Section::ALL
            .iter()
            .map(|s| {
                if self.sections.is_active(*s) {
                    format!("[{}]", s.label())
                } else {
                    s.label().to_string()
                }
            })
            .collect();

        format!("{}\n\n{}", tabs.join("  "), body)
    }

    async fn render_dashboard(&self) -> String {
        match self.dashboard.state().await {
            DashboardState::Loading => "Loading QPU data...".to_string(),
            DashboardState::Failed => {
                format!("{}\nType /dashboard to retry.", DASHBOARD_ERROR_MESSAGE)
            }
            DashboardState::Ready(data) => {
                let mut out = String::from("QPU Performance Summary\n\n");
                for card in build_cards(&data) {
                    out.push_str(&card.to_string());
                    out.push('\n');
                }
                out.push_str("Quick Analysis\n");
                for kind in GraphKind::ALL {
                    out.push_str(&format!(
                        "  {:<20} /graph {:<12} {}\n",
                        kind.label(),
                        kind.as_str(),
                        self.backend.graph_url(kind)
                    ));
                }
                out
            }
        }
    }

    async fn render_transcript(&self) -> String {
        if self.chat.welcome_visible().await {
            let mut out = format!("{}\n", WELCOME_MESSAGE);
            for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
                out.push_str(&format!("  /suggest {}  {}\n", i + 1, suggestion));
            }
            return out;
        }

        let mut out = self
            .chat
            .transcript()
            .await
            .iter()
            .map(render_message)
            .collect::<Vec<_>>()
            .join("\n\n");
        if self.chat.is_loading() {
            out.push_str("\n\n...");
        }
        out
    }

    async fn download_graph(&self, kind: GraphKind) -> Result<PathBuf, ConsoleError> {
        let bytes = self.backend.graph(kind).await?;
        let path = self.graph_dir.join(kind.file_name());
        graphs::save_image(&path, &bytes)?;

        if self.open_graphs {
            if let Err(e) = graphs::open_in_browser(&path.to_string_lossy()) {
                tracing::warn!(error = %e, "Could not open graph viewer");
            }
        }

        Ok(path)
    }

    /// Read commands from stdin until `/quit` or end of input
    pub async fn run(self) -> Result<(), ConsoleError> {
        println!("QPU Console v{} - type /help for commands\n", env!("CARGO_PKG_VERSION"));
        self.run_with(BufReader::new(tokio::io::stdin())).await
    }

    /// Read commands from `input` until `/quit` or end of input
    ///
    /// Chat sends run as tasks so the loop keeps reading; any still pending
    /// when the loop ends are awaited before returning.
    pub async fn run_with<R>(mut self, input: R) -> Result<(), ConsoleError>
    where
        R: AsyncBufRead + Unpin,
    {
        println!("{}", self.render_section(self.sections.active()).await);

        let mut lines = input.lines();
        let mut pending = JoinSet::new();

        let read = loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            };
            while pending.try_join_next().is_some() {}

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };

            match outgoing_text(&command) {
                Some(Ok(text)) => {
                    self.sections.activate(Section::Assistant);
                    let chat = Arc::clone(&self.chat);
                    let graph_dir = self.graph_dir.clone();
                    pending.spawn(async move {
                        let outcome = chat.send(&text).await;
                        println!("{}\n", describe_outcome(&outcome, &graph_dir));
                    });
                    continue;
                }
                Some(Err(e)) => {
                    println!("{}\n", e);
                    continue;
                }
                None => {}
            }

            match self.execute(command).await {
                Ok(reply) if reply.quit => break Ok(()),
                Ok(reply) => println!("{}\n", reply.output),
                Err(e) => println!("{}\n", e),
            }
        };

        // Dropping the set would abort a reply still in flight
        while let Some(result) = pending.join_next().await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Chat task did not complete");
            }
        }

        Ok(read?)
    }
}

fn render_optimisation() -> String {
    let mut out = String::from("Optimisation Tools\n");
    for (i, (label, prompt)) in OPTIMISATION_PROMPTS.iter().enumerate() {
        out.push_str(&format!("  /prompt {}  {:<18} {}\n", i + 1, label, prompt));
    }
    out
}

/// Terminal text for a send result, saving any attached graph
pub fn describe_outcome(outcome: &SendOutcome, graph_dir: &Path) -> String {
    match outcome {
        SendOutcome::Rejected(RejectReason::Empty) => String::new(),
        SendOutcome::Rejected(RejectReason::Busy) => {
            "Still waiting for the previous reply; message not sent.".to_string()
        }
        SendOutcome::Failed(message) => render_message(message),
        SendOutcome::Replied(message) => {
            let mut out = render_message(message);
            if let Some(graph) = &message.graph {
                let path = graph_dir.join(format!("chat-{}.png", message.id));
                match graphs::decode_inline(graph).and_then(|bytes| graphs::save_image(&path, &bytes)) {
                    Ok(()) => out.push_str(&format!(" -> {}", path.display())),
                    Err(e) => tracing::warn!(error = %e, "Could not save chat graph"),
                }
            }
            out
        }
    }
}
