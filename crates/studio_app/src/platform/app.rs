use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use clap::Parser;
use studio_core::{update, AppState, ConfirmRequest, Msg};
use studio_engine::{EngineHandle, ProcessingService, ReqwestProcessingService};
use studio_logging::{studio_info, studio_warn};

use super::config::{self, Args};
use super::effects::{route, EngineCommands, MsgSink, Routed};
use super::logging;
use super::ui::constants::{ALERT_PREFIX, CONFIRM_SUFFIX, HELP, PROMPT};
use super::ui::input::{parse_answer, parse_command, Command};
use super::ui::render::render;

/// Everything the dispatch loop reacts to.
pub enum Inbound {
    Msg(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load(Args::parse())?;
    logging::initialize(config.log, &config.log_file);
    studio_info!("Connecting to {}", config.service.base_url);

    let stream_url = ReqwestProcessingService::new(config.service.clone())
        .and_then(|service| service.stream_url())
        .context("building the service client")?;

    let (tx, rx) = mpsc::channel::<Inbound>();
    let engine = EngineHandle::new(
        config.service.clone(),
        config.download_dir.clone(),
        Arc::new(MsgSink::new(tx.clone())),
    )
    .context("starting the engine")?;

    spawn_stdin_reader(tx.clone());
    let _ = tx.send(Inbound::Msg(Msg::PageOpened));

    let state = AppState::new(stream_url).with_texts(config.texts);
    let mut session = Session::new(state, engine, io::stdout(), io::stderr());
    session.prompt();
    while let Ok(inbound) = rx.recv() {
        if !session.handle(inbound) {
            break;
        }
    }
    studio_info!("Session closed");
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Inbound::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Inbound::InputClosed);
    });
}

/// Owns the controller state; the only place it is mutated.
pub struct Session<E, O, A> {
    state: AppState,
    engine: E,
    out: O,
    alerts: A,
    pending_confirmation: Option<ConfirmRequest>,
}

impl<E: EngineCommands, O: Write, A: Write> Session<E, O, A> {
    pub fn new(state: AppState, engine: E, out: O, alerts: A) -> Self {
        Self {
            state,
            engine,
            out,
            alerts,
            pending_confirmation: None,
        }
    }

    /// Returns false once the session should end.
    pub fn handle(&mut self, inbound: Inbound) -> bool {
        match inbound {
            Inbound::Msg(msg) => self.dispatch(msg),
            Inbound::Line(line) => {
                let keep_going = self.handle_line(&line);
                if keep_going {
                    self.prompt();
                }
                return keep_going;
            }
            Inbound::InputClosed => return false,
        }
        true
    }

    fn handle_line(&mut self, line: &str) -> bool {
        if let Some(request) = self.pending_confirmation.take() {
            let accepted = parse_answer(line);
            self.dispatch(Msg::ConfirmationAnswered { request, accepted });
            return true;
        }

        match parse_command(line, &self.state.view()) {
            Command::Dispatch(msg) => self.dispatch(msg),
            Command::Show => self.print_view(),
            Command::Help => self.print(HELP),
            Command::Quit => return false,
            Command::Empty => {}
            Command::Invalid(reason) => {
                self.print(&reason);
                self.print("type `help` for the list of commands");
            }
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let (state, effects) = update(self.state.clone(), msg);
        self.state = state;

        if self.state.consume_dirty() {
            self.print_view();
        }

        for effect in effects {
            match route(effect) {
                Routed::Engine(command) => self.engine.submit(command),
                Routed::StartStatusPoll => self.engine.start_status_poll(),
                Routed::Alert(message) => {
                    studio_warn!("Alert: {}", message);
                    let _ = writeln!(self.alerts, "{ALERT_PREFIX}{message}");
                    let _ = self.alerts.flush();
                }
                Routed::Confirm { prompt, request } => {
                    if self.pending_confirmation.replace(request).is_some() {
                        studio_warn!("Earlier confirmation replaced by a newer one");
                    }
                    self.print(&format!("{prompt}{CONFIRM_SUFFIX}"));
                }
            }
        }
    }

    fn print_view(&mut self) {
        for line in render(&self.state.view()) {
            let _ = writeln!(self.out, "{line}");
        }
        let _ = self.out.flush();
    }

    fn print(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    pub fn prompt(&mut self) {
        let _ = write!(self.out, "{PROMPT}");
        let _ = self.out.flush();
    }
}
