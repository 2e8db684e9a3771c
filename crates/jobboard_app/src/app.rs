use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use jobboard_core::{update, AppState, Msg};
use jobboard_engine::EngineHandle;
use jobboard_logging::{jb_info, jb_warn};

use crate::commands::{parse_command, resolve_saved_id, Command, HELP};
use crate::config::AppConfig;
use crate::effects::{map_event, EffectRunner};
use crate::render;

const EVENT_POLL: Duration = Duration::from_millis(50);

enum Input {
    Line(String),
    Closed,
}

pub(crate) fn run(config: AppConfig) -> anyhow::Result<()> {
    jb_info!(
        "Starting jobboard endpoint={} data_dir={:?}",
        config.endpoint,
        config.data_dir
    );
    let engine = EngineHandle::new(config.engine_config()).context("failed to start engine")?;
    let mut session = Session::new(EffectRunner::new(engine));
    let input_rx = spawn_stdin_reader();

    println!("{HELP}");
    session.dispatch(Msg::Started);

    loop {
        session.pump_engine();

        match input_rx.try_recv() {
            Ok(Input::Line(line)) => match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => session.execute(command),
                Err(message) => println!("{message}"),
            },
            Ok(Input::Closed) | Err(mpsc::TryRecvError::Disconnected) => break,
            Err(mpsc::TryRecvError::Empty) => {}
        }
    }

    session.finish();
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<Input> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Input::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    jb_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(Input::Closed);
    });
    rx
}

struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Applies `msg` and runs its effects. Returns whether any effect was
    /// produced.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        let produced = !effects.is_empty();
        self.runner.enqueue(effects);

        if self.state.consume_dirty() {
            println!("{}", render::status_line(&self.state.view()));
        }
        produced
    }

    fn pump_engine(&mut self) {
        let Some(first) = self.runner.engine().recv_timeout(EVENT_POLL) else {
            return;
        };
        self.dispatch(map_event(first));
        while let Some(event) = self.runner.engine().try_recv() {
            self.dispatch(map_event(event));
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Refresh => {
                if !self.dispatch(Msg::RefreshRequested) {
                    println!("a refresh is already running");
                }
            }
            Command::More => {
                if !self.dispatch(Msg::LoadMoreRequested) {
                    if self.state.feed().has_more() {
                        println!("busy; try again when the current fetch finishes");
                    } else {
                        println!("no more jobs");
                    }
                }
            }
            Command::List => {
                let view = self.state.view();
                print!("{}", render::job_list(&view.jobs));
                println!("{}", render::status_line(&view));
            }
            Command::Show(position) => match self.state.feed().jobs().get(position - 1) {
                Some(job) => print!(
                    "{}",
                    render::job_details(job, self.state.is_bookmarked(&job.id))
                ),
                None => println!("no job at position {position}"),
            },
            Command::Save(position) => match self.state.feed().jobs().get(position - 1) {
                Some(job) => {
                    let job = job.clone();
                    self.dispatch(Msg::BookmarkAdded(job));
                }
                None => println!("no job at position {position}"),
            },
            Command::Unsave(arg) => {
                match resolve_saved_id(self.state.bookmarks().bookmarks(), &arg) {
                    Some(id) => {
                        self.dispatch(Msg::BookmarkRemoved(id));
                    }
                    None => println!("no saved job with id {arg}"),
                }
            }
            Command::Saved => print!("{}", render::saved_list(&self.state.view().bookmarks)),
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
    }

    fn finish(mut self) {
        self.dispatch(Msg::Shutdown);
        self.runner.shutdown();
        jb_info!("Session closed");
    }
}
