//! One mounted clip list.
//!
//! Owns everything a list needs between mount and unmount: the loaded clips,
//! selection, the visible window and its pagination guard, the scroll
//! animator, and the drag controller. Intents for the host accumulate in an
//! outbox drained with [`ClipListView::take_intents`].
//!
//! Pointer move/up arrive through a window-wide [`EventHub`] so a drag keeps
//! tracking after the pointer leaves the list. The hub listener holds the
//! controller through a shared cell, so it always sees the live session, and
//! it is deregistered when the view is dropped. Dropping the view also
//! cancels any pending animation frame.

use crate::clip::{ClipId, ClipItem};
use crate::folder::ContainerId;
use crate::intent::ViewIntent;
use crate::pointer::PointerEvent;
use crate::source::ClipSource;
use clipdeck_core::{
    DeltaMode, DragStatus, EngineConfig, EngineResult, EventHub, FrameOutcome, FrameScheduler,
    FrameToken, HoverTarget, ItemSequence, Point, PointerDragController, ScrollAnimator,
    SelectionScrollPlanner, SelectionState, Subscription, Viewport, VirtualizedWindow,
    VisibleWindow,
};
use std::cell::RefCell;
use std::rc::Rc;

type DragController = PointerDragController<ClipId, ContainerId>;
type Outbox = Rc<RefCell<Vec<ViewIntent>>>;

pub struct ClipListView<S: ClipSource, F: FrameScheduler> {
    source: S,
    container: ContainerId,
    query: Option<String>,
    page_size: usize,
    clips: ItemSequence<ClipItem>,
    selection: SelectionState<ClipId>,
    window: VirtualizedWindow,
    animator: ScrollAnimator<F>,
    planner: SelectionScrollPlanner,
    drag: Rc<RefCell<DragController>>,
    outbox: Outbox,
    _pointer: Subscription,
}

impl<S: ClipSource, F: FrameScheduler> ClipListView<S, F> {
    /// Build the view and attach its pointer listener to `pointer_hub`.
    pub fn mount(
        source: S,
        container: ContainerId,
        config: &EngineConfig,
        scheduler: F,
        pointer_hub: &EventHub<PointerEvent>,
    ) -> Self {
        let drag = Rc::new(RefCell::new(DragController::new(&config.drag)));
        let outbox: Outbox = Rc::new(RefCell::new(Vec::new()));

        let listener_drag = Rc::clone(&drag);
        let listener_outbox = Rc::clone(&outbox);
        let pointer = pointer_hub.subscribe(move |event: &PointerEvent| {
            let mut drag = listener_drag.borrow_mut();
            let events = match event {
                PointerEvent::Move { .. } => drag.on_move(event.point()),
                PointerEvent::Up { .. } => drag.on_release(event.point()),
            };
            listener_outbox
                .borrow_mut()
                .extend(events.into_iter().map(ViewIntent::from));
        });

        tracing::debug!("Mounted clip list for container {:?}", container);

        Self {
            source,
            container,
            query: None,
            page_size: config.window.page_size,
            clips: ItemSequence::new(),
            selection: SelectionState::new(),
            window: VirtualizedWindow::new(config.window.clone()),
            animator: ScrollAnimator::new(config.scroll.clone(), scheduler),
            planner: SelectionScrollPlanner::new(config.window.item_extent, config.peek_offset()),
            drag,
            outbox,
            _pointer: pointer,
        }
    }

    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    /// The active search, if the list shows search results.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn clips(&self) -> &ItemSequence<ClipItem> {
        &self.clips
    }

    /// Clips inside the current window; everything else is not rendered.
    pub fn visible_clips(&self) -> &[ClipItem] {
        let window = self.visible_window();
        self.clips.slice(window.start, window.end)
    }

    pub fn visible_window(&self) -> VisibleWindow {
        self.window.window().unwrap_or_default()
    }

    pub fn has_more(&self) -> bool {
        self.window.has_more()
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.window.is_fetch_in_flight()
    }

    pub fn offset(&self) -> f64 {
        self.animator.offset()
    }

    pub fn scroll_target(&self) -> f64 {
        self.animator.target()
    }

    pub fn max_scroll(&self) -> f64 {
        self.animator.max_scroll()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn selected(&self) -> Option<&ClipId> {
        self.selection.get()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.resolve_index(&self.clips)
    }

    pub fn drag_status(&self) -> DragStatus {
        self.drag.borrow().status()
    }

    /// The drop zone under the pointer, for zone widgets to highlight
    /// themselves. Zones report entry and exit through
    /// [`target_enter`](Self::target_enter) and
    /// [`target_leave`](Self::target_leave), never by writing it.
    pub fn hover_target(&self) -> HoverTarget<ContainerId> {
        self.drag.borrow().hover_registry().get_hover()
    }

    pub fn take_intents(&mut self) -> Vec<ViewIntent> {
        std::mem::take(&mut *self.outbox.borrow_mut())
    }

    /// Replace the contents with the first page of the current container.
    pub async fn load_first_page(&mut self) -> EngineResult<usize> {
        self.query = None;
        self.reset_contents();

        let page = match self.source.fetch_page(&self.container, 0, self.page_size).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to load clips for {:?}: {}", self.container, e);
                self.refresh_layout();
                return Err(e);
            }
        };
        let returned = page.len();
        let appended = self.clips.append_page(page);
        self.window.set_has_more(self.page_size > 0 && returned >= self.page_size);
        tracing::debug!("Loaded {} clips for {:?}", appended, self.container);
        self.refresh_layout();
        Ok(appended)
    }

    /// Show a different folder (or the full history) from the top.
    pub async fn switch_container(&mut self, container: ContainerId) -> EngineResult<usize> {
        self.cancel_drag();
        self.container = container;
        self.load_first_page().await
    }

    /// Replace the contents with clips matching `query` from every
    /// container. Results are a single page, so pagination stays off until
    /// the search is cleared. A blank query clears the search.
    pub async fn search(&mut self, query: &str) -> EngineResult<usize> {
        if query.trim().is_empty() {
            return self.clear_search().await;
        }
        self.cancel_drag();
        self.query = Some(query.to_string());
        self.reset_contents();

        let results = match self.source.search(query, self.page_size).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", query, e);
                self.refresh_layout();
                return Err(e);
            }
        };
        let appended = self.clips.append_page(results);
        tracing::debug!("Search for {:?} matched {} clips", query, appended);
        self.refresh_layout();
        Ok(appended)
    }

    /// Leave search and reload the current container.
    pub async fn clear_search(&mut self) -> EngineResult<usize> {
        self.cancel_drag();
        self.load_first_page().await
    }

    /// Fetch the page a `RequestMore` asked for. Without an outstanding
    /// request this does nothing, so pages are only ever requested through
    /// the window's guard.
    pub async fn fetch_more(&mut self) -> EngineResult<usize> {
        if !self.window.is_fetch_in_flight() {
            tracing::debug!("fetch_more without an outstanding request; ignoring");
            return Ok(0);
        }
        let offset = self.clips.len();
        match self
            .source
            .fetch_page(&self.container, offset, self.page_size)
            .await
        {
            Ok(page) => {
                let returned = page.len();
                let appended = self.clips.append_page(page);
                self.window.complete_fetch(returned, appended, self.page_size);
                self.refresh_layout();
                Ok(appended)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch clips at offset {}: {}", offset, e);
                self.window.fail_fetch();
                Err(e)
            }
        }
    }

    /// The list was measured (or re-measured) along its scroll axis.
    pub fn resize(&mut self, container_extent: f64) {
        let content = self.window.content_extent();
        self.animator.set_extents(content, container_extent);
        self.recompute_window();
    }

    /// Returns the new scroll target; the offset follows on later frames.
    pub fn on_wheel(&mut self, delta: f64, mode: DeltaMode) -> f64 {
        self.animator.on_wheel(delta, mode)
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.animator.pending_frame()
    }

    pub fn on_frame(&mut self, token: FrameToken) -> Option<FrameOutcome> {
        let outcome = self.animator.on_frame(token)?;
        self.recompute_window();
        Some(outcome)
    }

    pub fn select(&mut self, id: &ClipId) -> bool {
        let Some(index) = self.clips.position(id) else {
            return false;
        };
        self.selection.set(Some(id.clone()));
        self.reveal(index);
        true
    }

    pub fn select_next(&mut self) -> Option<usize> {
        let index = self.selection.select_next(&self.clips)?;
        self.reveal(index);
        Some(index)
    }

    pub fn select_prev(&mut self) -> Option<usize> {
        let index = self.selection.select_prev(&self.clips)?;
        self.reveal(index);
        Some(index)
    }

    /// Press on a clip. Only the first press of a gesture is accepted.
    pub fn pointer_down(&mut self, id: ClipId, point: Point) -> bool {
        if !self.clips.contains(&id) {
            tracing::warn!("Pointer down on unknown clip {}", id);
            return false;
        }
        self.drag.borrow_mut().begin(id, point)
    }

    pub fn target_enter(&mut self, zone: ContainerId) {
        let events = self.drag.borrow_mut().on_target_enter(zone);
        self.push_intents(events);
    }

    pub fn target_leave(&mut self) {
        let events = self.drag.borrow_mut().on_target_leave();
        self.push_intents(events);
    }

    pub fn cancel_drag(&mut self) {
        let events = self.drag.borrow_mut().cancel();
        self.push_intents(events);
    }

    /// Reflect a committed drop locally. The clip's folder changes, and it
    /// leaves the list if the shown container no longer lists it. Search
    /// results span containers, so nothing leaves them. Returns whether the
    /// list changed.
    pub fn apply_move(&mut self, id: &ClipId, target: &ContainerId) -> bool {
        let Some(clip) = self.clips.position(id).and_then(|i| self.clips.get(i)) else {
            return false;
        };
        if clip.folder_id == *target {
            return false;
        }
        let mut moved = clip.clone();
        moved.folder_id = target.clone();
        if self.query.is_none() && !moved.belongs_to(&self.container) {
            return self.remove(id).is_some();
        }
        self.clips.update(id, |clip| *clip = moved)
    }

    /// Flip a clip's pin locally and keep pinned clips ahead of the rest.
    /// Returns the new pin state, or `None` for an unknown clip. In the
    /// pinned category an unpinned clip leaves the list.
    pub fn toggle_pin(&mut self, id: &ClipId) -> Option<bool> {
        let mut pinned = false;
        if !self.clips.update(id, |clip| {
            clip.is_pinned = !clip.is_pinned;
            pinned = clip.is_pinned;
        }) {
            return None;
        }
        tracing::debug!("Clip {} pinned={}", id, pinned);

        let listed = self
            .clips
            .position(id)
            .and_then(|i| self.clips.get(i))
            .map(|clip| clip.belongs_to(&self.container));
        if self.query.is_none() && listed == Some(false) {
            self.remove(id);
            return Some(pinned);
        }
        self.clips.float_to_front(|clip| clip.is_pinned);
        self.follow_selection();
        Some(pinned)
    }

    pub fn remove(&mut self, id: &ClipId) -> Option<ClipItem> {
        let index = self.clips.position(id)?;
        let removed = self.clips.remove(id)?;
        self.selection.reconcile_removal(&self.clips, index);
        self.refresh_layout();
        Some(removed)
    }

    /// Bring a clip to the front, as after pasting it. Pinned clips stay
    /// ahead of it unless it is pinned itself.
    pub fn promote(&mut self, id: &ClipId) -> bool {
        if !self.clips.move_to_front(id) {
            return false;
        }
        self.clips.float_to_front(|clip| clip.is_pinned);
        self.follow_selection();
        true
    }

    fn reset_contents(&mut self) {
        self.clips.clear();
        self.selection.clear();
        self.window.reset(false);
        // A request raised for the previous contents is abandoned.
        self.window.fail_fetch();
        self.animator.jump_to(0.0);
    }

    /// After a reorder, keep the selected clip on screen.
    fn follow_selection(&mut self) {
        if let Some(index) = self.selected_index() {
            self.reveal(index);
        }
        self.recompute_window();
    }

    fn reveal(&mut self, index: usize) {
        let viewport = Viewport {
            offset: self.animator.offset(),
            container_extent: self.animator.container_extent(),
            max_scroll: self.animator.max_scroll(),
        };
        if let Some(target) = self.planner.plan(index, viewport) {
            self.animator.scroll_to(target);
        }
    }

    fn refresh_layout(&mut self) {
        self.window.set_item_count(self.clips.len());
        let container = self.animator.container_extent();
        self.animator.set_extents(self.window.content_extent(), container);
        self.recompute_window();
    }

    fn recompute_window(&mut self) {
        let events = self
            .window
            .recompute(self.animator.offset(), self.animator.container_extent());
        self.push_intents(events);
    }

    fn push_intents<E: Into<ViewIntent>>(&mut self, events: Vec<E>) {
        self.outbox
            .borrow_mut()
            .extend(events.into_iter().map(Into::into));
    }
}

impl<S: ClipSource, F: FrameScheduler> Drop for ClipListView<S, F> {
    fn drop(&mut self) {
        tracing::debug!("Unmounting clip list for container {:?}", self.container);
    }
}
