// src/cli.rs
use std::{ env, fs, path::PathBuf };

use crate::{
    collection::IdPattern,
    config::options::{ AppOptions, SiteSource },
    config::consts::{ DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PREFIX, ID_VIEW_AS_COLLECTION },
    core::sanitize::sanitize_filename,
    facets::FacetForm,
    file,
    pages::{ AuthorPage, ConsumerPage, SearchPage },
    progress::Progress,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Uri { title: String, ids: String },
    Build { query: String, out: Option<String> },
    Facets { form: PathBuf, select: Vec<String> },
    SearchLink { results: PathBuf, count: usize },
    Help,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub options: AppOptions,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let inv = parse_args(&args)?;
    execute(inv)
}

pub fn execute(inv: Invocation) -> Result<(), Box<dyn std::error::Error>> {
    let opts = &inv.options;
    match inv.command {
        Command::Help => {
            println!("{}", include_str!("cli_help.txt"));
            Ok(())
        }

        Command::Uri { title, ids } => {
            let mut page = AuthorPage::init(&opts.site.page_url);
            page.set_title(&title);
            println!("{}", page.set_record_ids(&ids));
            Ok(())
        }

        Command::Build { query, out } => {
            let ids: IdPattern = opts.collection.id_pattern()?;
            let fetch = opts.site.fetcher(opts.collection.fetch_timeout());
            let resolver = opts.collection.resolver(fetch);
            logf!("CLI: build from {}", opts.site.describe());

            let mut prog = CliProgress::default();
            let page = ConsumerPage::init(&query, &ids, &resolver, Some(&mut prog));
            if let Some(e) = page.parse_error() {
                return Err(e.clone().into());
            }
            let Some(collection) = page.collection() else {
                return Err("collection was not assembled".into());
            };

            match out {
                None => {
                    let template = match &opts.export.template {
                        Some(t) => Some(fs::read_to_string(t)?),
                        None => None,
                    };
                    print!("{}", file::render_page(collection, template.as_deref()));
                }
                Some(o) => {
                    let default_name = join!(&sanitize_filename(&collection.title), ".html");
                    let path = file::resolve_single_out_path(&o, &default_name)?;
                    file::write_collection_to(&path, opts.export.template.as_deref(), collection)?;
                    eprintln!("Wrote {} record(s) to {}", collection.records.len(), path.display());
                }
            }
            Ok(())
        }

        Command::Facets { form, select } => {
            let html = fs::read_to_string(&form)?;
            let fetch = opts.site.fetcher(opts.collection.fetch_timeout());
            let mut page = SearchPage::init(FacetForm::from_html(&html), &*fetch, &opts.facets.table_path);
            if !page.filter().is_ready() {
                eprintln!("Facet table unavailable; showing all cities");
            }
            for county in &select {
                if page.form.set_checked(county, true) == 0 {
                    eprintln!("No county checkbox named '{county}'");
                }
            }
            let report = page.realign();
            for city in page.form.visible_cities() {
                println!("{city}");
            }
            eprintln!("shown={} hidden={} unchecked={}", report.shown, report.hidden, report.unchecked);
            Ok(())
        }

        Command::SearchLink { results, count } => {
            let html = fs::read_to_string(&results)?;
            let fetch = opts.site.fetcher(opts.collection.fetch_timeout());
            let mut page = SearchPage::init(FacetForm::default(), &*fetch, &opts.facets.table_path)
                .with_page_url(&opts.site.page_url)
                .with_id_pattern(opts.collection.id_pattern()?);
            let link = page.on_search_finished(count, Some(&html));
            println!("{ID_VIEW_AS_COLLECTION}: {}", if link.visible { "shown" } else { "hidden" });
            if let Some(href) = &link.href {
                println!("href: {href}");
            }
            Ok(())
        }
    }
}

pub fn parse_args(args: &[String]) -> Result<Invocation, Box<dyn std::error::Error>> {
    let mut options = AppOptions::default();
    let mut args = args.iter();

    let sub = match args.next() {
        None => return Ok(Invocation { command: Command::Help, options }),
        Some(s) => s.as_str(),
    };
    if matches!(sub, "-h" | "--help") {
        return Ok(Invocation { command: Command::Help, options });
    }

    let mut title: Option<String> = None;
    let mut ids: Option<String> = None;
    let mut query: Option<String> = None;
    let mut out: Option<String> = None;
    let mut form: Option<PathBuf> = None;
    let mut select: Vec<String> = Vec::new();
    let mut results: Option<PathBuf> = None;
    let mut count: Option<usize> = None;

    let mut host: Option<String> = None;
    let mut port: Option<u16> = None;
    let mut prefix: Option<String> = None;

    while let Some(a) = args.next() {
        let mut value = |name: &str| -> Result<String, Box<dyn std::error::Error>> {
            Ok(args.next().ok_or(format!("Missing value for {name}"))?.clone())
        };
        match a.as_str() {
            "--title" => title = Some(value("--title")?),
            "--ids" => ids = Some(value("--ids")?),
            "--query" => query = Some(value("--query")?),
            "--page" => options.site.page_url = value("--page")?,
            "-o" | "--out" => out = Some(value("-o")?),
            "--template" => options.export.template = Some(PathBuf::from(value("--template")?)),
            "--form" => form = Some(PathBuf::from(value("--form")?)),
            "--select" => select.push(value("--select")?),
            "--table" => options.facets.table_path = value("--table")?,
            "--results" => results = Some(PathBuf::from(value("--results")?)),
            "--count" => count = Some(value("--count")?.parse()?),

            "--site" => options.site.source = SiteSource::Dir(PathBuf::from(value("--site")?)),
            "--host" => host = Some(value("--host")?),
            "--port" => port = Some(value("--port")?.parse()?),
            "--prefix" => prefix = Some(value("--prefix")?),
            "--record-path" => options.collection.record_path = value("--record-path")?,
            "--id-pattern" => options.collection.id_pattern = value("--id-pattern")?,
            "--timeout" => options.collection.fetch_timeout_ms = value("--timeout")?.parse()?,
            "--workers" => {
                let n: usize = value("--workers")?.parse()?;
                if n == 0 { return Err("--workers must be at least 1".into()); }
                options.collection.max_in_flight = n;
            }
            "-h" | "--help" => return Ok(Invocation { command: Command::Help, options }),
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if host.is_some() || port.is_some() || prefix.is_some() {
        options.site.source = SiteSource::Http {
            host: host.unwrap_or_else(|| s!(DEFAULT_HOST)),
            port: port.unwrap_or(DEFAULT_PORT),
            prefix: prefix.unwrap_or_else(|| s!(DEFAULT_PREFIX)),
        };
    }

    let command = match sub {
        "uri" => Command::Uri {
            title: title.unwrap_or_default(),
            ids: ids.unwrap_or_default(),
        },
        "build" => Command::Build {
            query: query.ok_or("build needs --query")?,
            out,
        },
        "facets" => Command::Facets {
            form: form.ok_or("facets needs --form")?,
            select,
        },
        "search-link" => Command::SearchLink {
            results: results.ok_or("search-link needs --results")?,
            count: count.ok_or("search-link needs --count")?,
        },
        other => return Err(format!("Unknown command: {}", other).into()),
    };

    Ok(Invocation { command, options })
}

/// Alerts and a final tally on stderr; stdout stays clean for the HTML.
#[derive(Default)]
pub struct CliProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Resolving {} record(s)…", total);
    }
    fn item_done(&mut self, _position: usize, _id: &str) {
        self.done += 1;
    }
    fn item_failed(&mut self, _position: usize, _id: &str) {
        self.failed += 1;
    }
    fn alert(&mut self, msg: &str) {
        eprintln!("ALERT: {msg}");
    }
    fn finish(&mut self) {
        eprintln!("Done: {}/{} retrieved, {} failed", self.done, self.total, self.failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| s!(*a)).collect()
    }

    #[test]
    fn build_with_http_site() {
        let inv = parse_args(&args(&[
            "build", "--query", "?records=1", "--host", "bbti.example", "--prefix", "/bbti/", "--workers", "3",
        ]))
        .unwrap();
        assert_eq!(inv.command, Command::Build { query: s!("?records=1"), out: None });
        assert_eq!(
            inv.options.site.source,
            SiteSource::Http { host: s!("bbti.example"), port: 80, prefix: s!("/bbti/") }
        );
        assert_eq!(inv.options.collection.max_in_flight, 3);
    }

    #[test]
    fn facets_collects_selections() {
        let inv = parse_args(&args(&["facets", "--form", "s.html", "--select", "Capital", "--select", "Cowichan"])).unwrap();
        assert_eq!(
            inv.command,
            Command::Facets { form: PathBuf::from("s.html"), select: vec![s!("Capital"), s!("Cowichan")] }
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse_args(&args(&["build"])).is_err());
        assert!(parse_args(&args(&["uri", "--bogus"])).is_err());
        assert!(parse_args(&args(&["uri", "--title"])).is_err());
        assert!(parse_args(&args(&["build", "--query", "x", "--workers", "0"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
    }

    #[test]
    fn no_args_is_help() {
        assert_eq!(parse_args(&[]).unwrap().command, Command::Help);
    }
}
