//! CLI command implementations.

pub(crate) mod faq;
pub(crate) mod render;
pub(crate) mod toc;

use std::path::Path;

use ba_config::Config;
use ba_markup::{ArticleRenderer, LinkPolicy};

use crate::error::CliError;

pub(crate) use faq::FaqArgs;
pub(crate) use render::RenderArgs;
pub(crate) use toc::TocArgs;

/// Read article source from `path`, or from stdin when `path` is `-`.
pub(crate) fn read_source(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        Ok(std::io::read_to_string(std::io::stdin())?)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Build a renderer from the `[render]` and `[shortcodes]` sections.
pub(crate) fn build_renderer(config: &Config) -> ArticleRenderer {
    let render = &config.render;
    let policy = LinkPolicy::new()
        .with_external_prefixes(&render.external_prefixes)
        .with_hash_routes(render.hash_routes)
        .with_external_marker(render.external_marker.as_str());

    let renderer = ArticleRenderer::new()
        .with_link_policy(policy)
        .with_max_depth(render.max_depth);

    match &config.shortcodes.names {
        Some(names) => renderer.with_shortcodes(names),
        None => renderer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_renderer_defaults() {
        let renderer = build_renderer(&Config::default());
        assert_eq!(renderer.max_depth(), ArticleRenderer::DEFAULT_MAX_DEPTH);
        assert_eq!(renderer.link_policy(), &LinkPolicy::default());
        assert_eq!(
            renderer.shortcodes(),
            ArticleRenderer::new().shortcodes()
        );
        assert_eq!(
            renderer.render_html("[FAQ](#faq)"),
            r##"<p><a href="#faq">FAQ</a></p>"##
        );
    }

    #[test]
    fn test_build_renderer_from_config() {
        let mut config = Config::default();
        config.render.max_depth = 2;
        config.render.hash_routes = false;
        config.render.external_marker = String::new();
        config.shortcodes.names = Some(vec!["QUIZ".to_owned()]);

        let renderer = build_renderer(&config);
        assert_eq!(renderer.max_depth(), 2);
        assert_eq!(renderer.shortcodes(), ["QUIZ".to_owned()]);
        assert_eq!(
            renderer.render_html("[Brokers](/brokers)"),
            r#"<p><a href="/brokers">Brokers</a></p>"#
        );
    }
}
