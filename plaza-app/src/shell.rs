use crate::{
    command::{self, Command, SearchField},
    dispatch::{Dispatch, Outcome, execute},
    render::render,
    routes::Route,
    views::{ActiveView, header::Header},
};
use plaza_client::PlaceholderApi;
use plaza_common::{load::TokenSource, session::Session};
use std::{
    io::{self, BufRead, Write},
    sync::Arc,
    thread,
};
use thiserror::Error;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Error reading input: {0}")]
    Input(io::Error),
    #[error("Error writing output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
enum Flow {
    Continue,
    Redraw,
    Help,
    Wait,
    Quit,
}

impl From<bool> for Flow {
    fn from(changed: bool) -> Self {
        if changed {
            Flow::Redraw
        } else {
            Flow::Continue
        }
    }
}

pub type Input = UnboundedReceiver<io::Result<String>>;

/// Reads stdin lines on a dedicated thread. A blocking read cannot be cancelled, so the thread is
/// left behind when the shell stops and goes away with the process.
#[must_use]
pub fn stdin_lines() -> Input {
    let (line_tx, line_rx) = unbounded_channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    line_rx
}

/// Owns the session identity and the mounted view, reads commands, and runs every request as a
/// background task whose outcome is fed back into the loop. All view state is only touched from
/// the loop itself.
pub struct Shell {
    api: Arc<dyn PlaceholderApi>,
    session: Session,
    header: Header,
    view: ActiveView,
    tokens: TokenSource,
    queued: Vec<Dispatch>,
    in_flight: usize,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
    shutdown: CancellationToken,
}

impl Shell {
    #[must_use]
    pub fn new(api: Arc<dyn PlaceholderApi>, start: Route, shutdown: CancellationToken) -> Self {
        let mut tokens = TokenSource::default();
        let (view, dispatch) = ActiveView::mount(start, &mut tokens);
        let (outcome_tx, outcome_rx) = unbounded_channel();

        Self {
            api,
            session: Session::default(),
            header: Header::default(),
            view,
            tokens,
            queued: vec![dispatch],
            in_flight: 0,
            outcome_tx,
            outcome_rx,
            shutdown,
        }
    }

    /// Processes commands until `quit`, cancellation, or the end of input. At the end of input
    /// the loop keeps going until every in-flight request has settled.
    pub async fn run(&mut self, mut input: Input, out: &mut impl Write) -> Result<(), ShellError> {
        let mut input_open = true;
        let mut waiting = false;

        self.flush();
        self.redraw(out)?;

        loop {
            if self.in_flight == 0 {
                if !input_open {
                    debug!("End of input and nothing in flight");
                    break;
                }
                waiting = false;
            }

            tokio::select! {
                biased;
                () = self.shutdown.cancelled() => {
                    info!("Shutting down");
                    break;
                }
                Some(outcome) = self.outcome_rx.recv(), if self.in_flight > 0 => {
                    self.in_flight -= 1;
                    if self.apply(outcome) {
                        self.redraw(out)?;
                    }
                }
                line = input.recv(), if input_open && !waiting => {
                    let Some(line) = line else {
                        input_open = false;
                        continue;
                    };
                    let line = line.map_err(ShellError::Input)?;

                    match self.handle_line(&line) {
                        Flow::Continue => {}
                        Flow::Redraw => self.redraw(out)?,
                        Flow::Help => writeln!(out, "{}", command::help())?,
                        Flow::Wait => waiting = true,
                        Flow::Quit => break,
                    }
                    self.flush();
                }
            }
        }

        Ok(())
    }

    fn redraw(&self, out: &mut impl Write) -> Result<(), ShellError> {
        render(out, &self.header, &self.session, &self.view)?;
        Ok(())
    }

    fn flush(&mut self) {
        for Dispatch { token, request } in self.queued.drain(..) {
            debug!(%token, ?request, "Dispatching request");

            let api = Arc::clone(&self.api);
            let outcome_tx = self.outcome_tx.clone();
            self.in_flight += 1;

            tokio::spawn(async move {
                let response = execute(api.as_ref(), request).await;
                if outcome_tx.send(Outcome { token, response }).is_err() {
                    debug!(%token, "Shell is gone, dropping response");
                }
            });
        }
    }

    fn apply(&mut self, outcome: Outcome) -> bool {
        if self.header.owns(&outcome) {
            let logged_in = self.header.apply(outcome, &mut self.session);
            if logged_in
                && let Some(identity) = self.session.identity()
                && let ActiveView::Posts(view) = &mut self.view
            {
                view.sign_in(identity);
            }
            return logged_in;
        }
        if self.view.owns(&outcome) {
            return self.view.apply(outcome);
        }

        debug!(token = %outcome.token, "Discarding response nobody is waiting for");
        false
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Redraw;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                debug!(?command, "Handling command");
                self.handle(command)
            }
            Err(err) => {
                warn!(%err, "Invalid command, try 'help'");
                Flow::Continue
            }
        }
    }

    fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Go { route } => {
                self.navigate(route);
                Flow::Redraw
            }
            Command::Login { name } => {
                let name = name.join(" ");
                self.queued.extend(self.header.login(&name, &mut self.tokens));
                Flow::Continue
            }
            Command::Logout => {
                self.header.logout(&mut self.session);
                Flow::Redraw
            }
            Command::Search(search) => self.search(search.field(), &search.text()),
            Command::Page { page } => match &mut self.view {
                ActiveView::Albums(view) => view.select_page(page).into(),
                _ => self.unavailable("page"),
            },
            Command::Open { id } => self.open(id),
            Command::Close => match &mut self.view {
                ActiveView::Photos(view) => view.close().into(),
                ActiveView::Posts(view) => view.close_comments().into(),
                _ => self.unavailable("close"),
            },
            Command::Remove { id } => match &mut self.view {
                ActiveView::Users(view) => view.remove(id.into()).into(),
                _ => self.unavailable("remove"),
            },
            Command::Delete { id } => self.delete(id),
            Command::Post(text) => {
                let ActiveView::Posts(view) = &mut self.view else {
                    return self.unavailable("post");
                };
                match text.split("title and body") {
                    Ok((title, body)) => {
                        let dispatch = view.create(&self.session, title, body, &mut self.tokens);
                        self.queued.extend(dispatch);
                    }
                    Err(err) => warn!(%err, "Not publishing post"),
                }
                Flow::Continue
            }
            Command::Comment(text) => {
                let ActiveView::Posts(view) = &mut self.view else {
                    return self.unavailable("comment");
                };
                let Some(comments) = view.comments_mut() else {
                    return self.unavailable("comment");
                };
                match text.split("header and body") {
                    Ok((header, body)) => {
                        let dispatch = comments.add(header, body, &mut self.tokens);
                        self.queued.extend(dispatch);
                    }
                    Err(err) => warn!(%err, "Not adding comment"),
                }
                Flow::Continue
            }
            Command::Wait => Flow::Wait,
            Command::Help => Flow::Help,
            Command::Quit => Flow::Quit,
        }
    }

    fn navigate(&mut self, route: Route) {
        info!(%route, "Navigating");
        let (view, dispatch) = ActiveView::mount(route, &mut self.tokens);
        self.view = view;
        self.queued.push(dispatch);
    }

    fn search(&mut self, field: SearchField, text: &str) -> Flow {
        match &mut self.view {
            ActiveView::Users(view) if field == SearchField::Name => view.search(text),
            ActiveView::Photos(view) if field == SearchField::AlbumId => {
                view.search_album_id(text);
            }
            ActiveView::Photos(view) => view.search_photo_id(text),
            _ => return self.unavailable("search"),
        }
        Flow::Redraw
    }

    fn open(&mut self, id: u64) -> Flow {
        let route = match &mut self.view {
            ActiveView::Users(_) => Route::UserAlbums(id.into()),
            ActiveView::Albums(_) => Route::AlbumPhotos(id.into()),
            ActiveView::Photos(view) => return view.enlarge(id.into()).into(),
            ActiveView::Posts(view) => {
                let dispatch = view.open_comments(&self.session, id.into(), &mut self.tokens);
                self.queued.push(dispatch);
                return Flow::Redraw;
            }
        };

        self.navigate(route);
        Flow::Redraw
    }

    fn delete(&mut self, id: u64) -> Flow {
        let ActiveView::Posts(view) = &mut self.view else {
            return self.unavailable("delete");
        };

        let dispatch = match view.comments_mut() {
            Some(comments) => comments.delete(id.into(), &mut self.tokens),
            None => view.delete(&self.session, id.into(), &mut self.tokens),
        };
        self.queued.extend(dispatch);
        Flow::Continue
    }

    fn unavailable(&self, command: &str) -> Flow {
        warn!(command, route = %self.view.route(), "Command is not available here");
        Flow::Continue
    }
}
