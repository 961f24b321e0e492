//! Truncated label: keeps a display string fitted to its container.

use log::{debug, info};
use ratatui::style::Style;

use crate::fit::{DEFAULT_ELLIPSIS, Fit, FitOptions, fit_text};
use crate::measure::{CellContext, Measure, MeasureContext};
use crate::schedule::{FitScheduler, LayoutSignal, RunId, RunToken};

/// A run that has finished its search but not yet published.
#[derive(Debug)]
pub struct CompletedRun {
    token: RunToken,
    container_width: u16,
    fit: Fit,
}

impl CompletedRun {
    pub fn id(&self) -> RunId {
        self.token.id()
    }
}

/// Last published run, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub id: RunId,
    pub container_width: u16,
    pub fit: Fit,
}

/// Single-line label that middle-truncates its text to fit its container.
#[derive(Debug)]
pub struct TruncatedLabel {
    text: String,
    ellipsis: String,
    style: Style,
    options: FitOptions,
    scheduler: FitScheduler,
    /// Content width observed at the last layout, `None` before the first.
    container_width: Option<u16>,
    /// What is currently shown.
    display: String,
    published: Option<Published>,
}

impl TruncatedLabel {
    /// Create a label showing `text` untruncated until the first run.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut scheduler = FitScheduler::new();
        scheduler.notify(LayoutSignal::PropsChanged);
        Self {
            display: text.clone(),
            text,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            style: Style::default(),
            options: FitOptions::default(),
            scheduler,
            container_width: None,
            published: None,
        }
    }

    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_options(mut self, options: FitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ellipsis(&self) -> &str {
        &self.ellipsis
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// The string to render.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn published(&self) -> Option<&Published> {
        self.published.as_ref()
    }

    pub fn container_width(&self) -> Option<u16> {
        self.container_width
    }

    /// Replace the source text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            info!("label text changed ({} chars)", text.chars().count());
            self.text = text;
            self.scheduler.notify(LayoutSignal::PropsChanged);
        }
    }

    /// Replace the ellipsis glyph.
    pub fn set_ellipsis(&mut self, ellipsis: impl Into<String>) {
        let ellipsis = ellipsis.into();
        if ellipsis != self.ellipsis {
            info!("label ellipsis changed to {ellipsis:?}");
            self.ellipsis = ellipsis;
            self.scheduler.notify(LayoutSignal::PropsChanged);
        }
    }

    /// Record the container's laid out content width.
    ///
    /// Called on every layout pass; only an actual change raises a resize.
    pub fn observe_width(&mut self, width: u16) {
        if self.container_width != Some(width) {
            debug!("container width {:?} -> {width}", self.container_width);
            self.container_width = Some(width);
            self.scheduler.notify(LayoutSignal::Resized);
        }
    }

    /// One-shot notification that cell metrics can be trusted.
    pub fn fonts_ready(&mut self) {
        if self.scheduler.notify(LayoutSignal::FontsReady) {
            debug!("fonts ready, refitting");
        }
    }

    /// Whether a run is waiting for the next frame.
    pub fn needs_fit(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Rendering context matching the visible label.
    pub fn context(&self) -> CellContext {
        CellContext::new(self.style, self.container_width)
    }

    /// Run the search on a hidden surface if a run is pending.
    ///
    /// Returns the id of the published run, if one was published.
    pub fn on_frame(&mut self) -> Option<RunId> {
        let context = self.context();
        self.on_frame_with(&context)
    }

    /// [`Self::on_frame`] with an explicit measuring context.
    pub fn on_frame_with<C: MeasureContext>(&mut self, context: &C) -> Option<RunId> {
        // Not laid out yet: leave the request pending.
        self.container_width?;
        if !self.scheduler.take_pending() {
            return None;
        }
        let run = self.start_run(context)?;
        let id = run.id();
        self.publish(run).then_some(id)
    }

    /// Start a run and search synchronously, without publishing.
    ///
    /// Any run started earlier is cancelled. Returns `None` before layout
    /// and after teardown.
    pub fn start_run<C: MeasureContext>(&mut self, context: &C) -> Option<CompletedRun> {
        let width = self.container_width?;
        let token = self.scheduler.begin_run()?;

        // Released here, or by Drop if the search unwinds.
        let mut surface = context.create();
        let fit = fit_text(
            &self.text,
            &self.ellipsis,
            f64::from(width),
            &mut surface,
            &self.options,
        );
        surface.destroy();

        debug!(
            "run {} for width {width}: {:?} after {} measurements",
            token.id(),
            fit.text,
            fit.measurements
        );
        Some(CompletedRun {
            token,
            container_width: width,
            fit,
        })
    }

    /// Publish a finished run. Stale runs are dropped and `false` is returned.
    pub fn publish(&mut self, run: CompletedRun) -> bool {
        let CompletedRun {
            token,
            container_width,
            fit,
        } = run;
        let shown = fit.text.clone();
        if !self.scheduler.publish(&token, &mut self.display, shown) {
            return false;
        }
        self.published = Some(Published {
            id: token.id(),
            container_width,
            fit,
        });
        true
    }

    /// Disengage width observation and cancel the in-flight run.
    pub fn teardown(&mut self) {
        self.scheduler.teardown();
    }
}
