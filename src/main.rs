use std::process::ExitCode;

use pagegroom::config::Settings;
use pagegroom::dom::parser::parse_html;
use pagegroom::engine::runtime::Enhancer;
use pagegroom::net::fetch::fetch_page;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(source) = args.next() else {
        eprintln!("usage: pagegroom <url-or-file>");
        return ExitCode::from(2);
    };

    let (html, origin) = if source.starts_with("http://") || source.starts_with("https://") {
        match fetch_page(&source) {
            Ok(page) => (page.html, page.url),
            Err(e) => {
                eprintln!("pagegroom: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        match std::fs::read_to_string(&source) {
            Ok(html) => (html, format!("file://{}", source)),
            Err(e) => {
                eprintln!("pagegroom: {}: {}", source, e);
                return ExitCode::FAILURE;
            }
        }
    };

    let mut tree = parse_html(&html, &origin);
    let mut enhancer = Enhancer::new(Settings::default());
    enhancer.attach(&mut tree);

    log::info!(
        "{}: {} nodes after normalization",
        tree.url,
        tree.root.node_count()
    );

    println!("{}", tree.to_html());
    ExitCode::SUCCESS
}
