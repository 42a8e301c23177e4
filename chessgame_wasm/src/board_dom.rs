// Applies `BoardRender` to the page. Every render throws away the previous board nodes and builds
// the board from scratch. Old listeners go with them, unless a drag is in progress: the browser
// keeps sending "dragend" to the detached source node, so those listeners must outlive it.

use std::cell::RefCell;
use std::rc::Weak;

use chessgame::{BoardOrientation, BoardRender, Coord, Force, SquareRender, SquareShade};
use web_sys::DragEvent;

use crate::web_document::{WebDocument, web_document};
use crate::web_element_ext::{OwnedListener, WebElementExt};
use crate::web_error_handling::JsResult;


// Receiver of board input. Listeners hold it weakly so that the board never keeps its owner
// alive.
pub trait BoardInput {
    fn drag_start(&self, source: Coord) -> JsResult<()>;
    fn drag_end(&self) -> JsResult<()>;
    fn drop_piece(&self, dest: Coord) -> JsResult<()>;
}

pub struct BoardDom {
    element: web_sys::Element,
    listeners: RefCell<Vec<OwnedListener<DragEvent>>>,
    // Listeners of superseded renders, kept until the ongoing drag ends.
    retired_listeners: RefCell<Vec<OwnedListener<DragEvent>>>,
}

impl BoardDom {
    pub fn new(element: web_sys::Element) -> Self {
        BoardDom {
            element,
            listeners: RefCell::new(Vec::new()),
            retired_listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn apply(
        &self, render: &BoardRender, input: Weak<dyn BoardInput>, drag_in_progress: bool,
    ) -> JsResult<()> {
        let document = web_document()?;
        let mut listeners = Vec::new();
        self.element.remove_all_children();
        let rotated = render.orientation == BoardOrientation::Rotated;
        self.element.class_list().toggle_with_force("flipped", rotated)?;

        for sq in &render.squares {
            let square_node = document
                .create_element("div")?
                .with_classes(["square", shade_class(sq.shade)])?
                .with_attribute("data-row", &sq.coord.row.to_zero_based().to_string())?
                .with_attribute("data-col", &sq.coord.col.to_zero_based().to_string())?
                .with_attribute("data-square", &sq.coord.to_algebraic())?;
            if let Some(piece_node) = render_piece(&document, sq, &input, &mut listeners)? {
                square_node.append_child(&piece_node)?;
            }

            // Drop targets must cancel "dragover", otherwise the browser never fires "drop".
            listeners.push(square_node.add_owned_event_listener("dragover", |event: DragEvent| {
                event.prevent_default();
                Ok(())
            })?);
            let coord = sq.coord;
            let drop_input = input.clone();
            listeners.push(square_node.add_owned_event_listener("drop", move |event: DragEvent| {
                event.prevent_default();
                match drop_input.upgrade() {
                    Some(input) => input.drop_piece(coord),
                    None => Ok(()),
                }
            })?);
            self.element.append_child(&square_node)?;
        }

        // Old closures can only be freed once their nodes are detached.
        let previous = self.listeners.replace(listeners);
        if drag_in_progress {
            self.retired_listeners.borrow_mut().extend(previous);
        } else {
            self.release_retired_listeners();
        }
        Ok(())
    }

    // Call once the drag is over. May run inside a retired listener: wasm-bindgen frees a closure
    // only after its running invocation returns.
    pub fn release_retired_listeners(&self) { self.retired_listeners.borrow_mut().clear(); }
}

fn render_piece(
    document: &WebDocument, sq: &SquareRender, input: &Weak<dyn BoardInput>,
    listeners: &mut Vec<OwnedListener<DragEvent>>,
) -> JsResult<Option<web_sys::Element>> {
    let Some(piece) = sq.piece else {
        return Ok(None);
    };
    let node = document
        .create_element("div")?
        .with_classes(["piece", force_class(piece.piece.force)])?
        .with_text_content(&piece.glyph.to_string());
    if piece.draggable {
        node.set_attribute("draggable", "true")?;
        let source = sq.coord;
        let start_input = input.clone();
        listeners.push(node.add_owned_event_listener("dragstart", move |event: DragEvent| {
            // Firefox refuses to start a drag without any payload.
            if let Some(data) = event.data_transfer() {
                data.set_data("text/plain", "")?;
            }
            match start_input.upgrade() {
                Some(input) => input.drag_start(source),
                None => Ok(()),
            }
        })?);
        let end_input = input.clone();
        listeners.push(node.add_owned_event_listener("dragend", move |_: DragEvent| {
            match end_input.upgrade() {
                Some(input) => input.drag_end(),
                None => Ok(()),
            }
        })?);
    }
    Ok(Some(node))
}

fn shade_class(shade: SquareShade) -> &'static str {
    match shade {
        SquareShade::Light => "light",
        SquareShade::Dark => "dark",
    }
}

fn force_class(force: Force) -> &'static str {
    match force {
        Force::White => "white",
        Force::Black => "black",
    }
}
