#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board_dom;
pub mod config;
pub mod web_document;
pub mod web_element_ext;
pub mod web_error_handling;
pub mod web_logger;
pub mod web_socket;

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::mpsc;

use chessgame::{
    ClientEvent, ClientState, Coord, Force, GameLogic, PlayerRole, ServerEvent, StandardChess,
};
use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;

use board_dom::{BoardDom, BoardInput};
use config::WebClientConfig;
use web_document::{web_document, web_window};
use web_error_handling::{JsResult, set_panic_hook};
use web_socket::SocketTransport;


// Everything the browser callbacks need. Shared as `Rc`; callbacks keep only `Weak` references.
struct ClientShell {
    state: RefCell<ClientState>,
    events_rx: mpsc::Receiver<ClientEvent>,
    board: BoardDom,
    socket: RefCell<Option<SocketTransport>>,
}

impl ClientShell {
    fn render(self: &Rc<Self>) -> JsResult<()> {
        let (render, drag_in_progress) = {
            let state = self.state.borrow();
            (state.render(), state.piece_drag().is_some())
        };
        let input: Weak<ClientShell> = Rc::downgrade(self);
        self.board.apply(&render, input, drag_in_progress)
    }

    fn on_frame(self: &Rc<Self>, frame: &str) -> JsResult<()> {
        let event: ServerEvent = match serde_json::from_str(frame) {
            Ok(event) => event,
            Err(err) => {
                warn!("Dropping malformed frame {frame:?}: {err}");
                return Ok(());
            }
        };
        let result = self.state.borrow_mut().process_server_event(event);
        match result {
            Ok(notable) => {
                // The alert blocks, so the board is redrawn only after the user dismisses it.
                if let Some(notice) = notable.notice() {
                    web_window()?.alert_with_message(&notice)?;
                }
            }
            Err(err) => error!("{err}"),
        }
        self.render()
    }

    fn flush_outgoing(&self) -> JsResult<()> {
        while let Ok(event) = self.events_rx.try_recv() {
            let frame = serde_json::to_string(&event)
                .map_err(|err| rust_error!("Cannot serialize {event:?}: {err}"))?;
            match self.socket.borrow().as_ref() {
                Some(socket) if socket.is_open() => socket.send(&frame)?,
                _ => warn!("Not connected, dropping {frame}"),
            }
        }
        Ok(())
    }
}

impl BoardInput for ClientShell {
    fn drag_start(&self, source: Coord) -> JsResult<()> {
        if let Err(err) = self.state.borrow_mut().start_drag_piece(source) {
            debug!("Cannot drag from {source}: {err:?}");
        }
        Ok(())
    }

    fn drag_end(&self) -> JsResult<()> {
        self.state.borrow_mut().abort_drag_piece();
        self.board.release_retired_listeners();
        Ok(())
    }

    fn drop_piece(&self, dest: Coord) -> JsResult<()> {
        self.state.borrow_mut().drag_piece_drop(dest);
        self.flush_outgoing()
    }
}

#[wasm_bindgen]
pub struct WebClient {
    shell: Rc<ClientShell>,
}

#[wasm_bindgen]
impl WebClient {
    // Creates the client and renders the initial position without connecting.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> JsResult<WebClient> {
        WebClient::with_config(&WebClientConfig::from_json(config_json)?)
    }

    pub fn connect(&self, url: &str) -> JsResult<()> {
        let shell = Rc::downgrade(&self.shell);
        let socket = SocketTransport::connect(url, move |frame| {
            let Some(shell) = shell.upgrade() else {
                return;
            };
            if let Err(err) = shell.on_frame(&frame) {
                error!("Cannot process frame: {err:?}");
            }
        })?;
        info!("Connecting to {url}");
        *self.shell.socket.borrow_mut() = Some(socket);
        Ok(())
    }

    pub fn render(&self) -> JsResult<()> { self.shell.render() }

    // Entry point for frames delivered by the page itself rather than by our socket.
    pub fn process_server_event(&self, frame: &str) -> JsResult<()> { self.shell.on_frame(frame) }

    // "w", "b", or "" for a spectator.
    pub fn role(&self) -> String {
        let role = match self.shell.state.borrow().role() {
            PlayerRole::Player(Force::White) => "w",
            PlayerRole::Player(Force::Black) => "b",
            PlayerRole::Spectator => "",
        };
        role.to_owned()
    }

    // Current position as FEN.
    pub fn snapshot(&self) -> String { GameLogic::snapshot(self.shell.state.borrow().game()) }
}

impl WebClient {
    fn with_config(config: &WebClientConfig) -> JsResult<WebClient> {
        set_panic_hook();
        web_logger::init_logger(config.log_level_filter()?);
        let board_element = web_document()?.query_selector_existing(&config.board_selector)?;
        let (events_tx, events_rx) = mpsc::channel();
        let shell = Rc::new(ClientShell {
            state: RefCell::new(ClientState::new(Box::new(StandardChess::new()), events_tx)),
            events_rx,
            board: BoardDom::new(board_element),
            socket: RefCell::new(None),
        });
        shell.render()?;
        Ok(WebClient { shell })
    }
}

#[wasm_bindgen]
pub fn start_client(config_json: &str) -> JsResult<WebClient> {
    let config = WebClientConfig::from_json(config_json)?;
    let client = WebClient::with_config(&config)?;
    let url = config.resolve_socket_url(&web_window()?.location())?;
    client.connect(&url)?;
    Ok(client)
}
