// tests/collection_resolve.rs
use std::{
    collections::HashMap,
    sync::{ mpsc, Arc, Mutex },
    thread,
    time::Duration,
};

use bbti_collect::collection::{ CollectionSpec, Fragment, IdPattern, Resolver };
use bbti_collect::core::net::Fetch;
use bbti_collect::errors::{ FetchError, ResolveError };
use bbti_collect::pages::ConsumerPage;
use bbti_collect::progress::AlertLog;

/// In-memory site: path → page. Missing paths answer 404.
#[derive(Default)]
struct MapFetcher {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
}

impl MapFetcher {
    fn record(mut self, id: &str, body: &str) -> Self {
        self.pages.insert(format!("orgs/org_{id}.html"), body.to_string());
        self
    }
    fn slow(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(format!("orgs/org_{id}.html"), delay);
        self
    }
}

impl Fetch for MapFetcher {
    fn get_text(&self, path: &str) -> Result<String, FetchError> {
        if let Some(d) = self.delays.get(path) {
            thread::sleep(*d);
        }
        self.pages.get(path).cloned().ok_or_else(|| FetchError::Status {
            status: "HTTP/1.0 404 Not Found".into(),
            path: path.into(),
        })
    }
}

fn record_page(name: &str) -> String {
    format!("<html><body><nav><div>menu</div></nav><main><div class=\"org\"><h3>{name}</h3><div><p>Gunmaker</p></div></div></main></body></html>")
}

fn spec(ids: &[&str]) -> CollectionSpec {
    CollectionSpec::new("Test collection", ids.iter().map(|s| s.to_string()).collect())
}

#[test]
fn failed_fetch_is_omitted_in_place() {
    let site = MapFetcher::default().record("5", &record_page("Smith"));
    let resolver = Resolver::new(Arc::new(site));
    let mut log = AlertLog::default();

    let c = resolver.resolve(&spec(&["5", "7", "5"]), Some(&mut log)).unwrap();

    assert_eq!(c.positions(), vec![1, 3]);
    assert_eq!(c.omitted, vec![(2, "7".to_string())]);
    assert_eq!(
        log.alerts,
        vec!["Error attempting to retrieve record for id 7. Does this record exist?".to_string()]
    );
    assert_eq!(log.failed, vec![2]);

    let html = c.render_html();
    assert_eq!(html.matches("<h3>Smith</h3>").count(), 2);
    assert!(!html.contains("menu"));
}

#[test]
fn order_is_positional_whatever_settles_first() {
    let site = MapFetcher::default()
        .record("1", &record_page("First"))
        .record("2", &record_page("Second"))
        .record("3", &record_page("Third"))
        .slow("1", Duration::from_millis(80))
        .slow("2", Duration::from_millis(40));
    let resolver = Resolver::new(Arc::new(site)).with_max_in_flight(3);

    let c = resolver.resolve(&spec(&["1", "2", "3"]), None).unwrap();
    let html = c.render_html();
    let a = html.find("First").unwrap();
    let b = html.find("Second").unwrap();
    let d = html.find("Third").unwrap();
    assert!(a < b && b < d);
}

#[test]
fn page_without_wrapper_is_not_found_placeholder() {
    let site = MapFetcher::default().record("9", "<html><body><p>Moved</p></body></html>");
    let resolver = Resolver::new(Arc::new(site));

    let c = resolver.resolve(&spec(&["9"]), None).unwrap();
    assert_eq!(c.records[0].fragment, Fragment::NotFound { id: "9".into() });
    assert!(c.render_html().contains("<div class=\"org\">Record with id 9 not found.</div>"));
}

#[test]
fn stalled_fetch_times_out_and_is_omitted() {
    let site = MapFetcher::default()
        .record("1", &record_page("One"))
        .record("2", &record_page("Two"))
        .record("3", &record_page("Three"))
        .slow("2", Duration::from_millis(1500));
    let resolver = Resolver::new(Arc::new(site))
        .with_max_in_flight(3)
        .with_fetch_timeout(Duration::from_millis(150));
    let mut log = AlertLog::default();

    let c = resolver.resolve(&spec(&["1", "2", "3"]), Some(&mut log)).unwrap();
    assert_eq!(c.positions(), vec![1, 3]);
    assert_eq!(c.omitted, vec![(2, "2".to_string())]);
    assert_eq!(log.alerts.len(), 1);
}

/// Blocks every fetch until released, and reports when one has started.
struct GateFetcher {
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
    fail: bool,
}

impl GateFetcher {
    fn new(fail: bool) -> (Self, mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let gate = Self { entered: Mutex::new(entered_tx), release: Mutex::new(release_rx), fail };
        (gate, entered_rx, release_tx)
    }
}

impl Fetch for GateFetcher {
    fn get_text(&self, path: &str) -> Result<String, FetchError> {
        if let Ok(tx) = self.entered.lock() {
            let _ = tx.send(());
        }
        if let Ok(rx) = self.release.lock() {
            let _ = rx.recv_timeout(Duration::from_secs(5));
        }
        if self.fail {
            return Err(FetchError::Status { status: "HTTP/1.0 500 Internal Server Error".into(), path: path.into() });
        }
        Ok(record_page("Late"))
    }
}

#[test]
fn newer_resolve_supersedes_older() {
    let (gate, entered_rx, release_tx) = GateFetcher::new(false);
    let resolver = Resolver::new(Arc::new(gate));

    let older = {
        let resolver = resolver.clone();
        thread::spawn(move || resolver.resolve(&spec(&["1"]), None))
    };

    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let newer_generation = resolver.invalidate();
    release_tx.send(()).unwrap();

    let result = older.join().unwrap();
    assert_eq!(
        result,
        Err(ResolveError::Superseded { generation: newer_generation - 1, current: newer_generation })
    );
}

#[test]
fn superseded_resolve_raises_no_alerts() {
    let (gate, entered_rx, release_tx) = GateFetcher::new(true);
    let resolver = Resolver::new(Arc::new(gate));

    let older = {
        let resolver = resolver.clone();
        thread::spawn(move || {
            let mut log = AlertLog::default();
            let result = resolver.resolve(&spec(&["1"]), Some(&mut log));
            (result, log)
        })
    };

    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    resolver.invalidate();
    release_tx.send(()).unwrap();

    let (result, log) = older.join().unwrap();
    assert!(matches!(result, Err(ResolveError::Superseded { .. })));
    assert!(log.alerts.is_empty());
    assert!(log.failed.is_empty());
}

#[test]
fn consumer_page_stays_empty_on_parse_error() {
    let resolver = Resolver::new(Arc::new(MapFetcher::default()));
    let page = ConsumerPage::init("?collTitle=Broken&records=1;;2", &IdPattern::default(), &resolver, None);
    assert!(page.parse_error().is_some());
    assert!(page.heading().is_none());
    assert!(page.render_html().is_none());
}

#[test]
fn consumer_page_resolves_query() {
    let site = MapFetcher::default().record("12", &record_page("Jones"));
    let resolver = Resolver::new(Arc::new(site));
    let page = ConsumerPage::init(
        "http://bbti.example/collection.html?collTitle=Jones%20only&records=12",
        &IdPattern::default(),
        &resolver,
        None,
    );
    assert_eq!(page.heading(), Some("Jones only"));
    let html = page.render_html().unwrap();
    assert!(html.starts_with("<h2>Jones only</h2>\n<div id=\"recordCollection\">\n<div class=\"org\"><h3>Jones</h3>"));
}
