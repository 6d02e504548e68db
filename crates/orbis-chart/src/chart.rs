//! The per-chart value tying store, scales, view state, controller and sink together.

use std::sync::Arc;

use orbis_core::profiling::{profile_function, profile_scope};

use crate::animation::{AnimationController, AnimationState, FrameOutcome, FrameTicket};
use crate::clock::{Clock, SystemClock};
use crate::config::{ChartConfig, LabelSource};
use crate::error::ConfigError;
use crate::order::sort_draw_order;
use crate::scale::ChartScales;
use crate::sink::{Frame, RenderItem, RenderSink, display_year};
use crate::store::{EntityId, SeriesStore};
use crate::view::EntityViewState;

/// An animated bubble chart over one [`SeriesStore`].
///
/// All mutable state (current year, hover flags, draw order) lives here, so
/// several charts can share one store. Every recomputation ends with a
/// [`Frame`] handed to the sink.
///
/// # Example
///
/// ```ignore
/// let mut chart = BubbleChart::new(store, ChartConfig::default(), sink)?;
/// chart.render();
///
/// let mut ticket = chart.start();
/// while let Some(t) = ticket {
///     // wait for the next animation frame
///     ticket = chart.on_frame(t);
/// }
/// ```
#[derive(Debug)]
pub struct BubbleChart<S: RenderSink> {
    store: Arc<SeriesStore>,
    config: ChartConfig,
    scales: ChartScales,
    ids: Vec<EntityId>,
    labels: Vec<Arc<str>>,
    views: Vec<EntityViewState>,
    draw_order: Vec<usize>,
    items: Vec<RenderItem>,
    controller: AnimationController,
    sink: S,
}

impl<S: RenderSink> BubbleChart<S> {
    /// Create a chart driven by the system clock.
    pub fn new(
        store: impl Into<Arc<SeriesStore>>,
        config: ChartConfig,
        sink: S,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(store, config, sink, Box::new(SystemClock::new()))
    }

    /// Create a chart driven by `clock`.
    ///
    /// The sweep covers `config.years`, else the range the store was loaded
    /// for, else the whole years spanned by its samples. View state starts at
    /// the first year; nothing is presented until [`render`](Self::render) or
    /// the first frame.
    pub fn with_clock(
        store: impl Into<Arc<SeriesStore>>,
        config: ChartConfig,
        sink: S,
        clock: Box<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = store.into();

        let years = config
            .years
            .or(store.years())
            .unwrap_or_else(|| store.sample_years());
        let scales = ChartScales::from_store(&store, &config);
        let start_year = years.start() as f64;

        let views: Vec<EntityViewState> = store
            .entities()
            .map(|entity| {
                let mut view = EntityViewState::at_year(entity, start_year);
                view.refresh_label(&scales.radius, config.label_threshold_px);
                view
            })
            .collect();

        let ids: Vec<EntityId> = store.entities().map(|e| e.id().clone()).collect();
        let labels = store
            .entities()
            .map(|entity| match &config.label_source {
                LabelSource::Name => Arc::from(entity.id().as_str()),
                LabelSource::Aux(key) => {
                    Arc::from(entity.aux_value(key).unwrap_or(entity.id().as_str()))
                }
            })
            .collect();

        let mut draw_order: Vec<usize> = (0..views.len()).collect();
        sort_draw_order(&mut draw_order, &views);

        let controller =
            AnimationController::new(years, config.sweep_duration, config.reset_policy, clock);

        tracing::debug!(
            "Created chart: {} entities, years {}..={}",
            ids.len(),
            years.start(),
            years.end()
        );

        Ok(Self {
            store,
            config,
            scales,
            ids,
            labels,
            items: Vec::with_capacity(views.len()),
            views,
            draw_order,
            controller,
            sink,
        })
    }

    /// Begin or resume the sweep. Returns the ticket for the first frame.
    pub fn start(&mut self) -> Option<FrameTicket> {
        self.controller.start()
    }

    /// Freeze at the last presented year.
    pub fn pause(&mut self) {
        self.controller.pause();
    }

    /// Rewind to the start year and present it, then restart or idle according
    /// to [`ResetPolicy`](crate::ResetPolicy).
    pub fn reset(&mut self) -> Option<FrameTicket> {
        let ticket = self.controller.reset();
        self.tick(self.controller.current_year());
        ticket
    }

    /// Apply one animation frame.
    ///
    /// Returns the ticket for the next frame, or `None` when the sweep finished
    /// or the ticket was superseded.
    pub fn on_frame(&mut self, ticket: FrameTicket) -> Option<FrameTicket> {
        match self.controller.advance(ticket) {
            FrameOutcome::Tick { year, next } => {
                self.tick(year);
                next
            }
            FrameOutcome::Stale => None,
        }
    }

    /// Recompute and present the current year without advancing time.
    pub fn render(&mut self) {
        self.tick(self.controller.current_year());
    }

    /// Recompute label visibility and present again.
    ///
    /// Applies hover changes while no sweep is running.
    pub fn refresh(&mut self) {
        let threshold = self.config.label_threshold_px;
        for view in &mut self.views {
            view.refresh_label(&self.scales.radius, threshold);
        }
        self.present(self.controller.current_year());
    }

    /// Pointer entered the bubble of `id`. Returns `false` for unknown entities.
    pub fn on_hover_enter(&mut self, id: &str) -> bool {
        self.set_hovered(id, true)
    }

    /// Pointer left the bubble of `id`. Returns `false` for unknown entities.
    pub fn on_hover_leave(&mut self, id: &str) -> bool {
        self.set_hovered(id, false)
    }

    fn set_hovered(&mut self, id: &str, hovered: bool) -> bool {
        match self.store.index_of(id) {
            Some(index) => {
                self.views[index].set_hovered(hovered);
                true
            }
            None => {
                tracing::debug!("Hover message for unknown entity '{}'", id);
                false
            }
        }
    }

    /// The tick pipeline: interpolate, recompute labels, re-sort, present.
    fn tick(&mut self, year: f64) {
        profile_function!();
        tracing::trace!("Tick at {:.3}", year);

        {
            profile_scope!("interpolate");
            let threshold = self.config.label_threshold_px;
            for (view, entity) in self.views.iter_mut().zip(self.store.entities()) {
                view.update(entity, year);
                view.refresh_label(&self.scales.radius, threshold);
            }
        }

        {
            profile_scope!("sort");
            sort_draw_order(&mut self.draw_order, &self.views);
        }

        self.present(year);
    }

    fn present(&mut self, year: f64) {
        profile_scope!("present");

        self.items.clear();
        self.items.extend(self.draw_order.iter().map(|&index| {
            let view = &self.views[index];
            RenderItem {
                entity: self.ids[index].clone(),
                label: self.labels[index].clone(),
                x: view.x,
                y: view.y,
                radius: view.radius,
                label_hidden: view.label_hidden(),
            }
        }));

        self.sink.present(&Frame {
            year,
            display_year: display_year(year),
            items: &self.items,
            scales: &self.scales,
        });
    }

    pub fn store(&self) -> &Arc<SeriesStore> {
        &self.store
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn scales(&self) -> &ChartScales {
        &self.scales
    }

    /// Controller snapshot: current year, range, phase.
    pub fn state(&self) -> &AnimationState {
        self.controller.state()
    }

    /// Ticket for the next frame of the running sweep, if any.
    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.controller.pending_frame()
    }

    /// View state in load order.
    pub fn views(&self) -> &[EntityViewState] {
        &self.views
    }

    pub fn view(&self, id: &str) -> Option<&EntityViewState> {
        self.store.index_of(id).map(|index| &self.views[index])
    }

    /// Entity ids in the current draw order, largest bubble first.
    pub fn draw_order(&self) -> impl ExactSizeIterator<Item = &EntityId> {
        self.draw_order.iter().map(|&index| &self.ids[index])
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::TimeSeries;
    use crate::store::Entity;
    use crate::{AnimationPhase, ResetPolicy, YearRange};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Debug, Clone, Default)]
    struct StepClock(Rc<Cell<Duration>>);

    impl Clock for StepClock {
        fn now(&self) -> Duration {
            self.0.get()
        }
    }

    #[derive(Debug, Default)]
    struct LastFrame {
        count: usize,
        display_year: i32,
        order: Vec<String>,
        hidden: Vec<bool>,
    }

    impl RenderSink for LastFrame {
        fn present(&mut self, frame: &Frame<'_>) {
            self.count += 1;
            self.display_year = frame.display_year;
            self.order = frame.items.iter().map(|i| i.label.to_string()).collect();
            self.hidden = frame.items.iter().map(|i| i.label_hidden).collect();
        }
    }

    fn series(a: f64, b: f64) -> TimeSeries {
        TimeSeries::from_pairs(&[(2000, a), (2010, b)]).unwrap()
    }

    fn store() -> SeriesStore {
        // Small overtakes big halfway through
        SeriesStore::builder()
            .with_years(YearRange::new(2000, 2010).unwrap())
            .entity(Entity::new("Big", series(1.0, 2.0), series(1.0, 2.0), series(900.0, 100.0)))
            .unwrap()
            .entity(Entity::new("Small", series(3.0, 4.0), series(3.0, 4.0), series(1.0, 1000.0)))
            .unwrap()
            .build()
            .unwrap()
    }

    fn chart(policy: ResetPolicy) -> (BubbleChart<LastFrame>, StepClock) {
        let clock = StepClock::default();
        let config = ChartConfig::default()
            .with_sweep_duration(Duration::from_secs(10))
            .with_reset_policy(policy);
        let chart =
            BubbleChart::with_clock(store(), config, LastFrame::default(), Box::new(clock.clone()))
                .unwrap();
        (chart, clock)
    }

    #[test]
    fn test_render_presents_start_year() {
        let (mut chart, _) = chart(ResetPolicy::Restart);
        assert_eq!(chart.sink().count, 0);
        chart.render();
        assert_eq!(chart.sink().count, 1);
        assert_eq!(chart.sink().display_year, 2000);
        assert_eq!(chart.sink().order, vec!["Big", "Small"]);
    }

    #[test]
    fn test_frames_reorder_by_radius() {
        let (mut chart, clock) = chart(ResetPolicy::Restart);
        let ticket = chart.start().unwrap();

        clock.0.set(Duration::from_secs(8));
        assert_eq!(chart.on_frame(ticket), Some(ticket));
        assert_eq!(chart.sink().display_year, 2008);
        assert_eq!(chart.sink().order, vec!["Small", "Big"]);
        assert_eq!(
            chart.draw_order().map(EntityId::as_str).collect::<Vec<_>>(),
            vec!["Small", "Big"]
        );
    }

    #[test]
    fn test_final_frame_ends_loop() {
        let (mut chart, clock) = chart(ResetPolicy::Restart);
        let ticket = chart.start().unwrap();
        clock.0.set(Duration::from_secs(10));
        assert_eq!(chart.on_frame(ticket), None);
        assert_eq!(chart.state().phase, AnimationPhase::Finished);
        assert_eq!(chart.sink().display_year, 2010);
    }

    #[test]
    fn test_stale_ticket_presents_nothing() {
        let (mut chart, _) = chart(ResetPolicy::Restart);
        let ticket = chart.start().unwrap();
        chart.pause();
        assert_eq!(chart.on_frame(ticket), None);
        assert_eq!(chart.sink().count, 0);
    }

    #[test]
    fn test_reset_presents_start_year() {
        let (mut chart, clock) = chart(ResetPolicy::Rewind);
        let ticket = chart.start().unwrap();
        clock.0.set(Duration::from_secs(5));
        chart.on_frame(ticket);
        assert_eq!(chart.sink().display_year, 2005);

        assert!(chart.reset().is_none());
        assert_eq!(chart.state().current_year, 2000.0);
        assert_eq!(chart.sink().display_year, 2000);
        assert_eq!(chart.state().phase, AnimationPhase::Idle);
    }

    #[test]
    fn test_hover_applies_on_refresh() {
        let (mut chart, _) = chart(ResetPolicy::Restart);
        chart.render();
        // Small has radius 1 at 2000: well under 10px on a 5..40 sqrt scale
        assert_eq!(chart.sink().hidden, vec![false, true]);

        assert!(chart.on_hover_enter("Small"));
        assert!(chart.view("Small").unwrap().label_hidden());
        chart.refresh();
        assert_eq!(chart.sink().hidden, vec![false, false]);

        assert!(chart.on_hover_leave("Small"));
        chart.refresh();
        assert_eq!(chart.sink().hidden, vec![false, true]);
    }

    #[test]
    fn test_hover_unknown_entity() {
        let (mut chart, _) = chart(ResetPolicy::Restart);
        assert!(!chart.on_hover_enter("Atlantis"));
    }

    #[test]
    fn test_label_from_aux() {
        let store = store().with_aux("Big", "code", "BG");
        let config = ChartConfig::default().with_label_source(LabelSource::Aux("code".into()));
        let mut chart = BubbleChart::new(store, config, LastFrame::default()).unwrap();
        chart.render();
        assert_eq!(chart.sink().order, vec!["BG", "Small"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ChartConfig::default().with_label_threshold(f64::NAN);
        assert!(BubbleChart::new(store(), config, LastFrame::default()).is_err());
    }
}
