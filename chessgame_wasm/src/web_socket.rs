use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use crate::rust_error;
use crate::web_error_handling::JsResult;


// Handlers must outlive the socket callbacks, so they are owned by the transport.
#[allow(dead_code)]
struct SocketHandlers {
    onopen: Closure<dyn FnMut(Event)>,
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(ErrorEvent)>,
    onclose: Closure<dyn FnMut(CloseEvent)>,
}

// Text-frame WebSocket connection. Inbound frames are handed to `on_frame` as is; decoding is
// up to the owner. There is no reconnect: a closed socket stays closed.
pub struct SocketTransport {
    ws: WebSocket,
    _handlers: SocketHandlers,
}

impl SocketTransport {
    pub fn connect(url: &str, on_frame: impl Fn(String) + 'static) -> JsResult<Self> {
        let ws = WebSocket::new(url)?;
        let on_frame = Rc::new(on_frame);

        let onopen = {
            let url = url.to_owned();
            Closure::wrap(Box::new(move |_event: Event| {
                info!("Connected to {url}");
            }) as Box<dyn FnMut(Event)>)
        };
        let onmessage = {
            let on_frame = Rc::clone(&on_frame);
            Closure::wrap(Box::new(move |event: MessageEvent| match event.data().as_string() {
                Some(text) => on_frame(text),
                None => warn!("Ignoring non-text frame"),
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let onerror = {
            let url = url.to_owned();
            Closure::wrap(Box::new(move |event: ErrorEvent| {
                warn!("Socket error ({url}): {}", event.message());
            }) as Box<dyn FnMut(ErrorEvent)>)
        };
        let onclose = {
            let url = url.to_owned();
            Closure::wrap(Box::new(move |event: CloseEvent| {
                let reason = event.reason();
                if reason.is_empty() {
                    warn!("Socket closed ({url}), code {}", event.code());
                } else {
                    warn!("Socket closed ({url}), code {}: {reason}", event.code());
                }
            }) as Box<dyn FnMut(CloseEvent)>)
        };

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        Ok(SocketTransport {
            ws,
            _handlers: SocketHandlers { onopen, onmessage, onerror, onclose },
        })
    }

    pub fn is_open(&self) -> bool { self.ws.ready_state() == WebSocket::OPEN }

    pub fn send(&self, text: &str) -> JsResult<()> {
        if !self.is_open() {
            return Err(rust_error!("Socket is not open"));
        }
        self.ws.send_with_str(text)
    }
}

impl Drop for SocketTransport {
    fn drop(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
        let _ = self.ws.close();
    }
}
