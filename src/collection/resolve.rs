// src/collection/resolve.rs
//
// Consuming side: fetch every record page of a collection concurrently,
// wait for all of them to settle, then assemble in id-list order.
//
// Invariants:
// - positions are 1-based and key the mapping (ids may repeat)
// - assembly order is position order, never completion order
// - a failed fetch is an omission (plus an alert), not a placeholder
// - a resolve that is no longer the newest discards its output

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{ AtomicU64, AtomicUsize, Ordering },
        mpsc::{ self, RecvTimeoutError },
        Arc,
    },
    thread,
    time::Duration,
};

use crate::{
    config::consts::{ FETCH_TIMEOUT_MS, ID_RECORD_COLLECTION, MAX_IN_FLIGHT, RECORD_PATH },
    core::net::Fetch,
    errors::{ FetchError, ResolveError },
    progress::Progress,
};

use super::{
    fragment::{ record_page_path, Fragment },
    spec::CollectionSpec,
};

/// A fragment at its place in the collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placed {
    pub position: usize,
    pub fragment: Fragment,
}

/// position → fragment, filled in whatever order fetches settle.
#[derive(Clone, Debug, Default)]
pub struct RecordResolution {
    mapping: BTreeMap<usize, Fragment>,
}

impl RecordResolution {
    pub fn settle(&mut self, position: usize, fragment: Fragment) {
        self.mapping.insert(position, fragment);
    }

    pub fn get(&self, position: usize) -> Option<&Fragment> {
        self.mapping.get(&position)
    }

    pub fn len(&self) -> usize { self.mapping.len() }
    pub fn is_empty(&self) -> bool { self.mapping.is_empty() }

    /// Walk positions `1..=total`, keeping only the settled ones.
    pub fn assemble(mut self, total: usize) -> Vec<Placed> {
        (1..=total)
            .filter_map(|position| {
                self.mapping
                    .remove(&position)
                    .map(|fragment| Placed { position, fragment })
            })
            .collect()
    }
}

/// What the consuming page displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledCollection {
    pub title: String,
    pub records: Vec<Placed>,
    /// (position, id) of records that could not be retrieved
    pub omitted: Vec<(usize, String)>,
}

impl AssembledCollection {
    /// Heading followed by the record container.
    pub fn render_html(&self) -> String {
        let mut out = format!("<h2>{}</h2>\n", html_escape::encode_text(&self.title));
        out.push_str(&self.render_container());
        out
    }

    /// Just the `<div id="recordCollection">` block.
    pub fn render_container(&self) -> String {
        let mut out = format!("<div id=\"{ID_RECORD_COLLECTION}\">\n");
        for placed in &self.records {
            out.push_str(&placed.fragment.to_html());
            out.push('\n');
        }
        out.push_str("</div>\n");
        out
    }

    pub fn positions(&self) -> Vec<usize> {
        self.records.iter().map(|p| p.position).collect()
    }
}

/// Shared, cloneable resolver. Clones share one generation counter, so a
/// newer resolve on any clone makes older in-flight ones stale.
#[derive(Clone)]
pub struct Resolver {
    fetch: Arc<dyn Fetch>,
    record_path: String,
    max_in_flight: usize,
    fetch_timeout: Duration,
    generation: Arc<AtomicU64>,
}

impl Resolver {
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self {
            fetch,
            record_path: s!(RECORD_PATH),
            max_in_flight: MAX_IN_FLIGHT,
            fetch_timeout: Duration::from_millis(FETCH_TIMEOUT_MS),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_record_path(mut self, record_path: &str) -> Self {
        self.record_path = s!(record_path);
        self
    }

    pub fn with_max_in_flight(mut self, n: usize) -> Self {
        self.max_in_flight = n.max(1);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn record_path(&self) -> &str { &self.record_path }

    pub fn fetcher(&self) -> Arc<dyn Fetch> { Arc::clone(&self.fetch) }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Make every in-flight resolve stale. Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Resolve all records of `spec` and assemble them in order.
    pub fn resolve(
        &self,
        spec: &CollectionSpec,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<AssembledCollection, ResolveError> {
        let generation = self.invalidate();
        let total = spec.len();

        logf!("Collection: Begin gen={} title='{}' records={}", generation, spec.title(), total);
        if let Some(p) = progress.as_deref_mut() {
            p.begin(total);
        }

        let (resolution, unsettled) = self.fetch_all(generation, spec.record_ids(), &mut progress);

        // a stale resolve reports nothing more; the newer one owns the sink
        let current = self.generation();
        if current != generation {
            logf!("Collection: gen={} superseded by gen={}, discarding", generation, current);
            return Err(ResolveError::Superseded { generation, current });
        }

        let mut omitted = Vec::new();
        for (i, id) in spec.record_ids().iter().enumerate() {
            let position = i + 1;
            if resolution.get(position).is_none() {
                omitted.push((position, id.clone()));
            }
        }
        for position in unsettled {
            let id = &spec.record_ids()[position - 1];
            if let Some(p) = progress.as_deref_mut() {
                p.item_failed(position, id);
            }
            alert!(progress, "Error attempting to retrieve record for id {}. Does this record exist?", id);
        }

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }

        let records = resolution.assemble(total);
        logf!("Collection: Done gen={} shown={} omitted={}", generation, records.len(), omitted.len());

        Ok(AssembledCollection { title: s!(spec.title()), records, omitted })
    }

    /// Fan out, then block on the all-settled barrier.
    /// Returns the resolution plus positions that never settled in time.
    /// Progress is only reported while `generation` is still current.
    fn fetch_all(
        &self,
        generation: u64,
        ids: &[String],
        progress: &mut Option<&mut dyn Progress>,
    ) -> (RecordResolution, Vec<usize>) {
        let mut resolution = RecordResolution::default();
        let total = ids.len();
        if total == 0 {
            return (resolution, Vec::new());
        }

        type Settled = (usize, Result<String, FetchError>);

        let ids_arc: Arc<Vec<String>> = Arc::new(ids.to_vec());
        let counter = Arc::new(AtomicUsize::new(0));
        let (res_tx, res_rx) = mpsc::channel::<Settled>();

        let workers = self.max_in_flight.min(total).max(1);

        for _ in 0..workers {
            let ids = Arc::clone(&ids_arc);
            let idx = Arc::clone(&counter);
            let tx = res_tx.clone();
            let fetch = Arc::clone(&self.fetch);
            let record_path = self.record_path.clone();

            thread::spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= ids.len() {
                        break;
                    }
                    let path = record_page_path(&record_path, &ids[i]);
                    let result = fetch.get_text(&path);
                    if tx.send((i + 1, result)).is_err() {
                        break; // barrier gave up on us
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        let mut settled = vec![false; total];
        let mut pending = total;

        while pending > 0 {
            match res_rx.recv_timeout(self.fetch_timeout) {
                Ok((position, result)) => {
                    settled[position - 1] = true;
                    pending -= 1;
                    let id = &ids_arc[position - 1];
                    let live = self.generation() == generation;

                    match result {
                        Ok(doc) => {
                            let fragment = Fragment::extract(id, &doc);
                            if !fragment.is_found() {
                                logd!("Collection: id {} has no record content", id);
                            }
                            resolution.settle(position, fragment);
                            if let Some(p) = progress.as_deref_mut().filter(|_| live) {
                                p.item_done(position, id);
                            }
                        }
                        Err(e) => {
                            loge!("Collection: position {} id {}: {}", position, id, e);
                            if !live {
                                continue;
                            }
                            if let Some(p) = progress.as_deref_mut() {
                                p.item_failed(position, id);
                            }
                            alert!(progress, "Error attempting to retrieve record for id {}. Does this record exist?", id);
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    loge!("Collection: nothing settled for {:?}; {} position(s) abandoned", self.fetch_timeout, pending);
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break, // workers ended early
            }
        }

        let unsettled = settled
            .iter()
            .enumerate()
            .filter(|(_, done)| !**done)
            .map(|(i, _)| i + 1)
            .collect();

        (resolution, unsettled)
    }
}
