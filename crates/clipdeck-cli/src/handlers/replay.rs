use crate::cli::ReplayArgs;
use crate::output;
use crate::script::{self, Step};
use clipdeck_core::{EngineConfig, EventHub, ManualFrameClock, Point, VisibleWindow};
use clipdeck_domain::{
    ClipId, ClipItem, ClipListView, ClipSource, InMemoryClipSource, PointerEvent, ViewIntent,
};
use serde::Serialize;

/// Frames delivered by an open-ended `frames` step before giving up.
const MAX_SETTLE_FRAMES: usize = 10_000;

type ReplayView<S> = ClipListView<S, ManualFrameClock>;

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub intents: Vec<ViewIntent>,
    pub items_loaded: usize,
    pub offset: f64,
    pub selected: Option<ClipId>,
    pub query: Option<String>,
    pub visible: VisibleWindow,
    pub visible_clips: Vec<ClipCard>,
}

/// What a rendered card shows.
#[derive(Debug, Serialize)]
pub struct ClipCard {
    pub id: ClipId,
    pub title: String,
    pub pinned: bool,
}

impl From<&ClipItem> for ClipCard {
    fn from(clip: &ClipItem) -> Self {
        Self {
            id: clip.id.clone(),
            title: clip.title(),
            pinned: clip.is_pinned,
        }
    }
}

pub async fn handle(config: &EngineConfig, args: ReplayArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.script).map_err(|e| {
        anyhow::anyhow!("Failed to read script {}: {}", args.script.display(), e)
    })?;
    let steps = script::parse(&content)?;

    let mut config = config.clone();
    if let Some(page_size) = args.page_size {
        config.window.page_size = page_size;
    }
    config.validate()?;

    let source = InMemoryClipSource::synthetic(args.items);
    let report = replay(source, &config, args.container_extent, &steps).await?;
    output::output_success(report)
}

/// Mount a view over `source`, run `steps` against it and report what the
/// view asked of its host. Page requests are served as soon as they appear.
pub async fn replay<S: ClipSource>(
    source: S,
    config: &EngineConfig,
    container_extent: f64,
    steps: &[Step],
) -> anyhow::Result<ReplayReport> {
    let hub = EventHub::new();
    let clock = ManualFrameClock::new();
    let mut view = ClipListView::mount(source, None, config, clock.clone(), &hub);
    let mut intents = Vec::new();

    view.load_first_page().await?;
    view.resize(container_extent);
    serve(&mut view, &mut intents).await?;

    for (index, step) in steps.iter().enumerate() {
        tracing::debug!("Step {}: {:?}", index, step);
        match step {
            Step::Down { clip, x, y } => {
                if !view.clips().contains(clip) {
                    anyhow::bail!("Step {}: clip {} is not loaded", index, clip);
                }
                view.pointer_down(clip.clone(), Point::new(*x, *y));
            }
            Step::Move { x, y } => hub.dispatch(&PointerEvent::Move { x: *x, y: *y }),
            Step::Up { x, y } => hub.dispatch(&PointerEvent::Up { x: *x, y: *y }),
            Step::Enter { folder } => view.target_enter(folder.clone()),
            Step::Leave => view.target_leave(),
            Step::Cancel => view.cancel_drag(),
            Step::Wheel { delta, mode } => {
                view.on_wheel(*delta, *mode);
            }
            Step::Frames { count } => {
                let limit = count.unwrap_or(MAX_SETTLE_FRAMES);
                for _ in 0..limit {
                    let due = clock.drain_due();
                    if due.is_empty() {
                        break;
                    }
                    for token in due {
                        view.on_frame(token);
                    }
                    serve(&mut view, &mut intents).await?;
                }
            }
            Step::Select { clip } => {
                if !view.select(clip) {
                    anyhow::bail!("Step {}: clip {} is not loaded", index, clip);
                }
            }
            Step::Next => {
                view.select_next();
            }
            Step::Prev => {
                view.select_prev();
            }
            Step::Resize { extent } => view.resize(*extent),
            Step::Search { query } => {
                view.search(query).await?;
            }
            Step::Pin { clip } => {
                if view.toggle_pin(clip).is_none() {
                    anyhow::bail!("Step {}: clip {} is not loaded", index, clip);
                }
            }
        }
        serve(&mut view, &mut intents).await?;
    }

    Ok(ReplayReport {
        intents,
        items_loaded: view.clips().len(),
        offset: view.offset(),
        selected: view.selected().cloned(),
        query: view.query().map(str::to_string),
        visible: view.visible_window(),
        visible_clips: view.visible_clips().iter().map(ClipCard::from).collect(),
    })
}

async fn serve<S: ClipSource>(
    view: &mut ReplayView<S>,
    intents: &mut Vec<ViewIntent>,
) -> anyhow::Result<()> {
    intents.extend(view.take_intents());
    while view.is_fetch_in_flight() {
        view.fetch_more().await?;
        intents.extend(view.take_intents());
    }
    Ok(())
}
