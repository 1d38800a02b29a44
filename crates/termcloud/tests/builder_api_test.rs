//! Integration tests for the CloudBuilder API

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use termcloud::{
    CloudBuilder, TermCloudError,
    annotation::{AnnotationRecord, Domain},
    config::{AppConfig, CloudConfig, StyleConfig},
    draw::FixedAdvance,
    events::{CloudEvent, Interaction},
    geometry::Point,
    query::{AnnotationSource, QueryError, QueryParameters},
    strategy::{CallbackKind, CallbackNames, ElementContext, Mode},
    surface::{Surfaces, SvgBuffer},
};

fn yeast_records() -> Vec<AnnotationRecord> {
    vec![
        AnnotationRecord::new(
            "GO:0000082",
            "G1/S transition of mitotic cell cycle",
            1e-10,
            Domain::BP,
        ),
        AnnotationRecord::new("GO:0033309", "SBF transcription complex", 1e-8, Domain::CC),
        AnnotationRecord::new("GO:0030907", "MBF transcription complex", 1e-6, Domain::CC),
        AnnotationRecord::new(
            "GO:0001228",
            "DNA-binding transcription activator activity",
            1e-4,
            Domain::MF,
        ),
        AnnotationRecord::new("KEGG:04111", "Cell cycle - yeast", 1e-3, Domain::Kegg),
    ]
}

/// Every text handed to the layout engine, placed or dropped.
fn laid_out_texts(layout: &termcloud::layout::CloudLayout) -> Vec<String> {
    layout
        .placed()
        .iter()
        .map(|element| element.text().to_string())
        .chain(layout.dropped().iter().cloned())
        .collect()
}

fn surfaces() -> Surfaces {
    let mut surfaces = Surfaces::new();
    surfaces.register("cloud", ["results"], SvgBuffer::new());
    surfaces
}

fn builder(cloud: CloudConfig) -> CloudBuilder {
    CloudBuilder::new(AppConfig::new(cloud, StyleConfig::default()))
        .expect("valid configuration")
        .with_measure(FixedAdvance::default())
}

/// Serves canned records and counts how often it was asked.
struct CannedSource {
    records: Vec<AnnotationRecord>,
    calls: Cell<usize>,
}

impl CannedSource {
    fn new(records: Vec<AnnotationRecord>) -> Self {
        Self {
            records,
            calls: Cell::new(0),
        }
    }
}

impl AnnotationSource for CannedSource {
    fn query(&self, _params: &QueryParameters) -> Result<Vec<AnnotationRecord>, QueryError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.records.clone())
    }
}

struct FailingSource;

impl AnnotationSource for FailingSource {
    fn query(&self, _params: &QueryParameters) -> Result<Vec<AnnotationRecord>, QueryError> {
        Err(QueryError::Unavailable("connection refused".to_string()))
    }
}

#[test]
fn test_render_word_mode() {
    let mut surfaces = surfaces();
    let rendered = builder(CloudConfig::default())
        .render_records(yeast_records(), &mut surfaces)
        .expect("render succeeds");

    let texts = laid_out_texts(rendered.layout());
    assert_eq!(texts.len(), 10);
    assert!(texts.contains(&"transcription".to_string()));
    assert!(texts.contains(&"dna-binding".to_string()));
    assert!(!texts.contains(&"of".to_string()));
    assert!(rendered.layout().placed().iter().any(|e| e.text() == "complex"));

    let document = surfaces.resolve("#cloud").unwrap().document().unwrap();
    assert_eq!(document, rendered.document());
    assert!(document.contains("<svg"));
    assert!(document.contains("</svg>"));
}

#[test]
fn test_render_term_mode_truncates_names() {
    let mut surfaces = surfaces();
    let cloud = CloudConfig::default()
        .with_mode(Mode::Term)
        .with_max_term_len(12)
        .with_size(1200.0, 300.0);
    let rendered = builder(cloud)
        .render_records(yeast_records(), &mut surfaces)
        .unwrap();

    let texts = laid_out_texts(rendered.layout());
    assert!(texts.contains(&"SBF transcri...".to_string()));
    assert!(texts.contains(&"Cell cycle -...".to_string()));
    assert!(!rendered.layout().placed().is_empty());
}

#[test]
fn test_scenario_container_checked_before_query() {
    let source = CannedSource::new(yeast_records());
    let mut surfaces = surfaces();
    let mut builder = builder(CloudConfig::default().with_container("#nowhere"));

    let err = builder
        .render_query(&QueryParameters::new(["swi4"], "scerevisiae"), &source, &mut surfaces)
        .unwrap_err();

    assert!(matches!(err, TermCloudError::Container { matches: 0, .. }));
    assert_eq!(source.calls.get(), 0);
}

#[test]
fn test_ambiguous_container_is_rejected() {
    let mut surfaces = surfaces();
    surfaces.register("second", ["results"], SvgBuffer::new());
    let err = builder(CloudConfig::default().with_container(".results"))
        .render_records(yeast_records(), &mut surfaces)
        .unwrap_err();
    assert!(matches!(err, TermCloudError::Container { matches: 2, .. }));
}

#[test]
fn test_render_query_links_logo_to_query() {
    let source = CannedSource::new(yeast_records());
    let mut surfaces = surfaces();
    let params = QueryParameters::new(["swi4", "swi6"], "scerevisiae");

    let rendered = builder(CloudConfig::default())
        .render_query(&params, &source, &mut surfaces)
        .unwrap();

    assert_eq!(source.calls.get(), 1);
    assert!(
        rendered
            .document()
            .contains("gost?organism=scerevisiae&amp;query=swi4%20swi6")
            || rendered
                .document()
                .contains("gost?organism=scerevisiae&query=swi4%20swi6")
    );
}

#[test]
fn test_query_errors_are_surfaced() {
    let mut surfaces = surfaces();
    let err = builder(CloudConfig::default())
        .render_query(&QueryParameters::default(), &FailingSource, &mut surfaces)
        .unwrap_err();
    assert!(matches!(
        err,
        TermCloudError::Query(QueryError::Unavailable(_))
    ));
}

#[test]
fn test_unknown_callback_fails_at_construction() {
    let callbacks = CallbackNames {
        colorer: Some("rainbow".to_string()),
        ..CallbackNames::default()
    };
    let config = AppConfig::new(
        CloudConfig::default().with_callbacks(callbacks),
        StyleConfig::default(),
    );

    let err = CloudBuilder::new(config).unwrap_err();
    assert!(matches!(
        err,
        TermCloudError::UnknownCallback {
            kind: CallbackKind::Colorer,
            ..
        }
    ));
}

#[test]
fn test_invalid_configuration_fails_at_construction() {
    let config = AppConfig::new(
        CloudConfig::default(),
        StyleConfig::default().with_background_color("definitely-not"),
    );
    assert!(matches!(
        CloudBuilder::new(config),
        Err(TermCloudError::Config(_))
    ));

    let config = AppConfig::new(
        CloudConfig::default().with_size(-1.0, 10.0),
        StyleConfig::default(),
    );
    assert!(matches!(
        CloudBuilder::new(config),
        Err(TermCloudError::Config(_))
    ));
}

#[test]
fn test_oversized_canvas_fails_at_construction() {
    let config = AppConfig::new(
        CloudConfig::default().with_size(1e30, 1e30),
        StyleConfig::default(),
    );
    let err = CloudBuilder::new(config).unwrap_err();
    assert!(matches!(err, TermCloudError::Config(msg) if msg.contains("width")));

    let config = AppConfig::new(
        CloudConfig::default().with_size(2.0, 16_000.0),
        StyleConfig::default(),
    );
    assert!(matches!(
        CloudBuilder::new(config),
        Err(TermCloudError::Config(_))
    ));
}

#[test]
fn test_largest_canvas_lays_out() {
    let builder = builder(CloudConfig::default().with_size(16_384.0, 16_384.0).with_max_n(3));
    let layout = builder.layout(yeast_records()).unwrap();
    assert_eq!(laid_out_texts(&layout).len(), 3);
    assert!(!layout.placed().is_empty());
    assert!(layout.is_overlap_free(2.0));
}

#[test]
fn test_invalid_record_is_rejected() {
    let mut records = yeast_records();
    records.push(AnnotationRecord::new("GO:bad", "broken", 0.0, Domain::BP));

    let err = builder(CloudConfig::default()).layout(records).unwrap_err();
    assert!(matches!(err, TermCloudError::InvalidRecord { .. }));
}

#[test]
fn test_degenerate_scores_are_rejected() {
    let err = builder(CloudConfig::default())
        .with_scorer(|_: &str, _: &[AnnotationRecord]| 0.0)
        .layout(yeast_records())
        .unwrap_err();
    assert!(matches!(err, TermCloudError::DegenerateScore));
}

#[test]
fn test_empty_input_renders_empty_cloud() {
    let mut surfaces = surfaces();
    let rendered = builder(CloudConfig::default())
        .render_records(Vec::new(), &mut surfaces)
        .unwrap();
    assert!(rendered.layout().placed().is_empty());
    assert!(rendered.document().contains("<svg"));
}

#[test]
fn test_custom_callbacks_are_used() {
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&sizes);

    let layout = builder(CloudConfig::default().with_max_n(3))
        .with_sizer(move |element: &ElementContext<'_>| {
            seen.borrow_mut().push(element.rank);
            20.0
        })
        .layout(yeast_records())
        .unwrap();

    assert_eq!(*sizes.borrow(), vec![0, 1, 2]);
    assert!(layout.placed().iter().all(|e| e.size() == 20.0));
}

#[test]
fn test_render_and_click_events() {
    let renders = Rc::new(Cell::new(0));
    let clicked = Rc::new(RefCell::new(Vec::new()));

    let mut builder = builder(CloudConfig::default().with_max_n(3));
    {
        let renders = Rc::clone(&renders);
        let clicked = Rc::clone(&clicked);
        builder
            .events_mut()
            .on_render(move || renders.set(renders.get() + 1))
            .on_click(move |event| {
                let ids: Vec<String> = event
                    .records()
                    .iter()
                    .map(|r| r.term_id().to_string())
                    .collect();
                clicked.borrow_mut().push(ids);
            });
    }
    let receiver = builder.events_mut().subscribe_channel();

    let mut surfaces = surfaces();
    let mut rendered = builder.render_records(yeast_records(), &mut surfaces).unwrap();
    assert_eq!(renders.get(), 1);
    assert_eq!(receiver.try_recv().unwrap(), CloudEvent::Rendered);

    // The first placed word sits at the canvas center
    let center = Point::new(150.0, 150.0);
    let hit = rendered
        .click(Interaction::new(center))
        .map(|element| element.text().to_string());
    assert!(hit.is_some());
    assert_eq!(clicked.borrow().len(), 1);
    assert!(!clicked.borrow()[0].is_empty());
    assert!(matches!(receiver.try_recv(), Ok(CloudEvent::Clicked(_))));

    assert!(rendered.click(Interaction::new(Point::new(1.0, 1.0))).is_none());
    assert_eq!(clicked.borrow().len(), 1);
}

#[test]
fn test_drop_report_when_warnings_enabled() {
    let mut surfaces = surfaces();
    let cloud = CloudConfig::default()
        .with_size(60.0, 40.0)
        .with_warnings(true)
        .with_mode(Mode::Term);
    let rendered = builder(cloud)
        .render_records(yeast_records(), &mut surfaces)
        .unwrap();

    let report = rendered.drop_report().expect("warnings enabled");
    assert_eq!(report.total(), 5);
    assert_eq!(report.dropped(), rendered.layout().dropped());
    assert!(report.fraction() > 0.0);

    let quiet = builder(CloudConfig::default().with_size(60.0, 40.0))
        .render_records(yeast_records(), &mut surfaces)
        .unwrap();
    assert!(quiet.drop_report().is_none());
}
