// File: ./src/render/page.rs
//! Full printable document for a [`ViewModel`].
use crate::controller::{LogView, ViewModel};
use crate::model::CategoryFilter;
use crate::render::markup::{Container, Element, Node};
use crate::render::sections::{banner_nodes, log_nodes, standard_nodes};
use rust_i18n::t;

const STYLE: &str = r#"
body{font-family:system-ui,"Segoe UI","Apple SD Gothic Neo","Malgun Gothic",sans-serif;margin:0;padding:24px;background:#0b1020;color:#e6ecff}
h1{font-size:20px;margin:0 0 12px} h2{font-size:16px;margin:24px 0 8px}
.controls{display:flex;gap:8px;flex-wrap:wrap;align-items:center;margin-bottom:12px}
.query{padding:6px 10px;border-radius:8px;border:1px solid #2a3560;background:#121a33;color:inherit;min-width:260px}
.cat{padding:4px 10px;border-radius:999px;border:1px solid #2a3560}
.cat.active{background:#2a3f8f}
.hint{color:#a9b7df;padding:12px 0}
.banner{display:flex;gap:8px;align-items:center;padding:8px 10px;margin:4px 0;border-radius:8px;background:#121a33;color:inherit;text-decoration:none}
.badge{display:inline-block;padding:2px 8px;border-radius:999px;background:#2a3f8f;font-size:12px;white-space:nowrap}
.tag{font-size:12px;color:#a9b7df;margin-left:8px}
.card{padding:10px;margin:6px 0;border-radius:8px;background:#121a33}
.card-title{margin:6px 0}
.card-actions{display:flex;gap:8px}
.log{padding:10px;margin:6px 0;border-radius:8px;background:#121a33}
.top{display:flex;justify-content:space-between;gap:8px}
.pill{display:inline-block;padding:2px 8px;border-radius:999px;font-size:12px}
.pill.changed{background:#8f2a2a} .pill.same{background:#2a5f3f}
.counts{margin-top:8px;color:#a9b7df;font-size:13px}
.meta{color:#a9b7df;font-size:13px}
.notice{position:fixed;bottom:16px;right:16px;padding:8px 12px;border-radius:8px;background:#8f2a2a}
@media print{.noprint{display:none} body{background:#fff;color:#000;padding:0} .banner,.card,.log{background:none;border:1px solid #ddd}}
"#;

/// Fixed behaviour for the page's own controls; never interpolated.
/// Localized strings reach it through `data-*` attributes.
const SCRIPT: &str = r#"
const notice = document.getElementById("notice");
let noticeTimer;
function showNotice(text) {
  notice.textContent = text;
  notice.hidden = false;
  clearTimeout(noticeTimer);
  noticeTimer = setTimeout(() => { notice.hidden = true; }, 4000);
}
document.getElementById("btnPrint").addEventListener("click", () => window.print());
for (const b of document.querySelectorAll("button.copy")) {
  b.addEventListener("click", async () => {
    try { await navigator.clipboard.writeText(b.dataset.url); alert(b.dataset.url); }
    catch (e) { showNotice(notice.dataset.copyFailed); }
  });
}
"#;

/// The three display containers of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Containers {
    pub banners: Container,
    pub standards: Container,
    pub logs: Container,
}

impl Containers {
    pub fn from_view(view: &ViewModel) -> Self {
        let mut banners = Container::new("banners");
        banners.replace_children(banner_nodes(&view.banners.iter().collect::<Vec<_>>()));

        let mut standards = Container::new("standards");
        standards.replace_children(standard_nodes(&view.standards.iter().collect::<Vec<_>>()));

        let mut logs = Container::new("logs");
        match &view.logs {
            LogView::Unavailable => crate::render::sections::render_log_unavailable(&mut logs),
            LogView::Records(records) => {
                logs.replace_children(log_nodes(&records.iter().collect::<Vec<_>>()))
            }
        }

        Self {
            banners,
            standards,
            logs,
        }
    }
}

fn category_selector(view: &ViewModel) -> Element {
    let button = |label: String, active: bool| -> Node {
        Element::new("span")
            .class(if active { "cat active" } else { "cat" })
            .text(label)
            .into()
    };
    let mut nodes = vec![button(
        t!("category_all").to_string(),
        view.filter.category == CategoryFilter::All,
    )];
    nodes.extend(view.categories.iter().map(|c| {
        button(
            c.to_string(),
            view.filter.category == CategoryFilter::Only(c.clone()),
        )
    }));
    Element::new("div").class("categories").children(nodes)
}

pub fn render_page(view: &ViewModel) -> String {
    let containers = Containers::from_view(view);

    let controls = Element::new("div")
        .class("controls")
        .child(
            Element::new("input")
                .id("q")
                .class("query")
                .attr("type", "search")
                .attr("placeholder", t!("search_placeholder"))
                .attr("value", view.filter.query.clone())
                .attr("readonly", "readonly"),
        )
        .child(category_selector(view))
        .child(
            Element::new("button")
                .id("btnPrint")
                .class("noprint")
                .attr("type", "button")
                .text(t!("print")),
        );

    let mut body = Element::new("body")
        .child(Element::new("h1").text(t!("app_title")))
        .child(controls);
    if let Some(last) = &view.listing_last {
        body = body.child(
            Element::new("div")
                .class("meta")
                .text(t!("last_collected", date = last.clone())),
        );
    }
    let body = body
        .child(Element::new("h2").text(t!("tab_banners")))
        .child(containers.banners.to_element())
        .child(Element::new("h2").text(t!("tab_standards")))
        .child(containers.standards.to_element())
        .child(Element::new("h2").text(t!("tab_logs")))
        .child(containers.logs.to_element())
        .child(
            Element::new("div")
                .id("notice")
                .class("notice noprint")
                .attr("role", "status")
                .attr("hidden", "hidden")
                .attr("data-copy-failed", t!("notice_copy_failed")),
        )
        .child(Element::new("script").child(Node::Trusted(SCRIPT)));

    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(Element::new("title").text(t!("app_title")))
        .child(Element::new("style").child(Node::Trusted(STYLE)));

    let mut out = String::from("<!DOCTYPE html>\n");
    Node::from(
        Element::new("html")
            .attr("lang", rust_i18n::locale().to_string())
            .child(head)
            .child(body),
    )
    .render(&mut out);
    out
}
