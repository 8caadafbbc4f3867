use std::io::{BufRead, Write};

use chrono::Datelike;

use flourish::application::Flourish;
use flourish::config::FlourishConfig;
use flourish::core::date::parse_date_key;
use flourish::message::{Message, PickerTarget};
use flourish::store::local::LocalStore;
use flourish::store::remote::RemoteStore;
use flourish::store::PlantStore;

const HELP: &str = "\
commands:
  add <name> [#rrggbb]   add a plant (and select it)
  select <n>             toggle selection of the n-th plant
  toggle <day|date>      flip the selected plant's mark (day number or YYYY-MM-DD)
  rename <name>          edit the selected plant's name (buffered)
  recolor <#rrggbb>      edit the selected plant's color (buffered)
  update                 commit buffered edits
  delete                 delete the selected plant
  pick [value]           open the color picker / set its draft
  ok | cancel            confirm or close the picker
  prev | next | today    change the displayed month
  help | quit";

enum Command {
    Quit,
    Help,
    Messages(Vec<Message>),
    Unknown(String),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = FlourishConfig::load();

    // Set up logging to the systemd user journal
    // (`journalctl --user -t flourish -f`). Wrapper filters: flourish crate
    // at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                if target.starts_with("flourish") {
                    let max = if flourish::debug_logging() {
                        log::LevelFilter::Debug
                    } else {
                        log::LevelFilter::Info
                    };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        if let Ok(journal) = systemd_journal_logger::JournalLog::new() {
            let journal = journal.with_syslog_identifier("flourish".to_string());
            flourish::set_debug_logging(config.debug_logging);
            let _ = log::set_boxed_logger(Box::new(FilteredJournal { inner: journal }));
            // Global max must be Debug so debug logs can pass through when toggled
            log::set_max_level(log::LevelFilter::Debug);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;

    let local = LocalStore::new(&config.data_directory);
    if let Err(e) = local.ensure_dir() {
        log::error!("Failed to create data directory: {}", e);
    }

    let force_local = std::env::args().any(|a| a == "--local");
    let store = match (&config.api_base_url, force_local) {
        (Some(url), false) => match RemoteStore::new(url) {
            Ok(remote) => {
                log::info!("Using remote backend at {}", url);
                PlantStore::remote(remote, local)
            }
            Err(e) => {
                log::error!("Failed to build HTTP client, falling back to local: {}", e);
                PlantStore::local(local)
            }
        },
        _ => PlantStore::local(local),
    };

    let (plants, selected) = runtime.block_on(store.load());

    // The update loop spawns fire-and-forget persistence tasks; keep the
    // runtime context entered on this thread so they have an executor.
    let _guard = runtime.enter();

    let mut app = Flourish::new(store);
    app.update(Message::PlantsLoaded(plants, selected));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", app.render(chrono::Local::now().date_naive()))?;
    writeln!(out, "{}", HELP)?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match parse_command(&app, &line) {
            Command::Quit => break,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Unknown(cmd) => {
                writeln!(out, "unknown command {:?} — `help` lists them", cmd)?
            }
            Command::Messages(messages) => {
                for message in messages {
                    app.update(message);
                }
                writeln!(out, "{}", app.render(chrono::Local::now().date_naive()))?;
            }
        }
        out.flush()?;
    }

    Ok(())
}

/// Translate one input line into messages for the update loop.
fn parse_command(app: &Flourish, line: &str) -> Command {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "" => Command::Messages(Vec::new()),
        "quit" | "exit" | "q" => Command::Quit,
        "help" | "?" => Command::Help,

        "prev" => Command::Messages(vec![Message::PrevMonth]),
        "next" => Command::Messages(vec![Message::NextMonth]),
        "today" => Command::Messages(vec![Message::GoToday]),

        "add" => {
            let mut messages = Vec::new();
            let mut name = rest;
            // A trailing #rrggbb token sets the color draft
            if let Some((head, tail)) = rest.rsplit_once(char::is_whitespace) {
                if tail.starts_with('#') {
                    name = head.trim_end();
                    messages.push(Message::AddColorChanged(tail.to_string()));
                }
            }
            messages.push(Message::AddNameChanged(name.to_string()));
            messages.push(Message::AddSubmit);
            Command::Messages(messages)
        }

        "select" => {
            let plant = rest
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| app.registry.plants().get(i));
            match plant {
                Some(plant) => Command::Messages(vec![Message::SelectPlant(plant.id.clone())]),
                None => Command::Unknown(format!("select {}", rest)),
            }
        }

        "toggle" => {
            let date = parse_date_key(rest).or_else(|| {
                rest.parse::<u32>()
                    .ok()
                    .and_then(|day| app.calendar.displayed_month.with_day(day))
            });
            match date {
                Some(date) => Command::Messages(vec![Message::ToggleDay(date)]),
                None => Command::Unknown(format!("toggle {}", rest)),
            }
        }

        "rename" => Command::Messages(vec![Message::EditNameChanged(rest.to_string())]),
        "recolor" => Command::Messages(vec![Message::EditColorChanged(rest.to_string())]),
        "update" => Command::Messages(vec![Message::CommitEdit]),
        "delete" => Command::Messages(vec![Message::DeleteSelected]),

        "pick" => {
            if rest.is_empty() {
                let target = if app.plants_bar.edit.is_some() {
                    PickerTarget::EditBuffer
                } else {
                    PickerTarget::AddForm
                };
                Command::Messages(vec![Message::OpenColorPicker(target)])
            } else if let Ok(n) = rest.parse::<usize>() {
                match n.checked_sub(1) {
                    Some(index) => Command::Messages(vec![Message::PickerPreset(index)]),
                    None => Command::Unknown(format!("pick {}", rest)),
                }
            } else {
                Command::Messages(vec![Message::PickerInputChanged(rest.to_string())])
            }
        }
        "ok" => Command::Messages(vec![Message::PickerConfirm]),
        "cancel" => Command::Messages(vec![Message::PickerCancel]),

        other => Command::Unknown(other.to_string()),
    }
}
