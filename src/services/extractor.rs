// src/services/extractor.rs

//! Post extraction from board listing pages.
//!
//! The listing is a table where genuine post rows carry a hover handler
//! (`onmouseover`); header, spacer and ad rows do not. Which rows count and
//! where each field sits is driven by [`BoardLayout`].

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{BoardLayout, CleaningConfig, Post};
use crate::utils::{parse_count, resolve_url};

/// Turns one raw listing document into posts.
///
/// Rows that cannot be turned into a complete post are dropped; extraction
/// itself never fails.
pub trait PostExtractor: Send + Sync {
    fn extract_posts(&self, document: &str) -> Vec<Post>;
}

/// Selector-driven extractor for the portal's board table.
pub struct BoardExtractor {
    row_sel: Selector,
    cell_sel: Selector,
    link_sel: Selector,
    layout: BoardLayout,
    cleaning: CleaningConfig,
    base_url: Url,
}

impl BoardExtractor {
    /// Compile the layout's selectors. `base_url` resolves relative links.
    pub fn new(layout: BoardLayout, cleaning: CleaningConfig, base_url: &str) -> Result<Self> {
        Ok(Self {
            row_sel: Self::parse_selector(&layout.row_selector)?,
            cell_sel: Self::parse_selector(&layout.cell_selector)?,
            link_sel: Self::parse_selector(&layout.link_selector)?,
            layout,
            cleaning,
            base_url: Url::parse(base_url)?,
        })
    }

    fn parse_row(&self, row: &ElementRef) -> Option<Post> {
        let cells: Vec<ElementRef> = row.select(&self.cell_sel).collect();
        if cells.len() < self.layout.min_columns {
            return None;
        }

        let title_cell = cells.get(self.layout.title_column)?;
        let anchor = title_cell.select(&self.link_sel).next()?;
        let href = anchor.value().attr(&self.layout.link_attr)?;
        let link = resolve_url(&self.base_url, href)?;

        let raw_title = anchor
            .value()
            .attr("title")
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| anchor.text().collect());
        let title = self.cleaning.clean_title(&raw_title);
        if title.is_empty() {
            return None;
        }

        let date = self
            .cleaning
            .clean_date(&Self::cell_text(cells.get(self.layout.date_column)?));
        let views = Self::cell_text(cells.get(self.layout.views_column)?);
        let likes = Self::cell_text(cells.get(self.layout.likes_column)?);
        let views_int = parse_count(&views)?;
        let likes_int = parse_count(&likes)?;

        Some(Post {
            title,
            link,
            date,
            views,
            likes,
            views_int,
            likes_int,
        })
    }

    fn cell_text(cell: &ElementRef) -> String {
        cell.text().collect::<String>().trim().to_string()
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

impl PostExtractor for BoardExtractor {
    fn extract_posts(&self, document: &str) -> Vec<Post> {
        let document = Html::parse_document(document);
        let mut posts = Vec::new();
        let mut skipped = 0usize;

        for row in document.select(&self.row_sel) {
            match self.parse_row(&row) {
                Some(post) => posts.push(post),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            log::debug!("Skipped {} malformed board rows", skipped);
        }
        posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://finance.naver.com";

    fn extractor() -> BoardExtractor {
        BoardExtractor::new(BoardLayout::default(), CleaningConfig::default(), BASE).unwrap()
    }

    fn post_row(nid: u32, title: &str, views: &str, likes: &str) -> String {
        format!(
            r#"<tr onMouseOver="mouseOver(this)" onMouseOut="mouseOut(this)">
                <td align="center"><span class="tah p10 gray03">2024.01.15 10:2{nid}</span></td>
                <td class="title">
                    <a href="/item/board_read.naver?code=005930&amp;nid={nid}&amp;st=&amp;sw=&amp;page=1" title="{title}">{title}</a>
                    <span class="tah p9">[3]</span>
                </td>
                <td class="p11"><span class="gray03">abcd****</span></td>
                <td><span class="tah p10 gray03">{views}</span></td>
                <td><strong class="tah p10 red01">{likes}</strong></td>
                <td><strong class="tah p10 blue01">0</strong></td>
            </tr>"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body><table class="type2" summary="게시판 리스트">
                <tr><th>날짜</th><th>제목</th><th>글쓴이</th><th>조회</th><th>공감</th><th>비공감</th></tr>
                <tr><td colspan="6" class="blank_09"></td></tr>
                {}
                <tr class="ad"><td colspan="6"><a href="/ad">광고</a></td></tr>
            </table></body></html>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(BoardExtractor::parse_selector("[[invalid").is_err());
    }

    #[test]
    fn test_extracts_marked_rows_only() {
        let html = page(&[
            post_row(1, "실적 기대됩니다", "1,234", "12"),
            post_row(2, "오늘 장 어떤가요", "56", "0"),
        ]);

        let posts = extractor().extract_posts(&html);

        assert_eq!(posts.len(), 2);
        let first = &posts[0];
        assert_eq!(first.title, "실적 기대됩니다");
        assert_eq!(
            first.link,
            "https://finance.naver.com/item/board_read.naver?code=005930&nid=1&st=&sw=&page=1"
        );
        assert_eq!(first.date, "2024.01.15 10:21");
        assert_eq!(first.views, "1,234");
        assert_eq!(first.views_int, 1234);
        assert_eq!(first.likes, "12");
        assert_eq!(first.likes_int, 12);
        assert_eq!(posts[1].title, "오늘 장 어떤가요");
    }

    #[test]
    fn test_row_missing_column_is_skipped() {
        let broken = r#"<tr onmouseover="mouseOver(this)">
                <td>2024.01.15 09:00</td>
                <td class="title"><a href="/item/board_read.naver?nid=9" title="조회수 없음">조회수 없음</a></td>
                <td>someone</td>
                <td>7</td>
            </tr>"#
            .to_string();
        let html = page(&[post_row(1, "정상 글", "10", "1"), broken]);

        let posts = extractor().extract_posts(&html);

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "정상 글");
    }

    #[test]
    fn test_unparsable_count_drops_row() {
        let html = page(&[
            post_row(1, "숫자 아님", "many", "1"),
            post_row(2, "음수", "10", "-1"),
            post_row(3, "정상", "10", "1"),
        ]);

        let posts = extractor().extract_posts(&html);

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "정상");
    }

    #[test]
    fn test_title_falls_back_to_text() {
        let row = r#"<tr onmouseover="x">
                <td>2024.01.15</td>
                <td><a href="/item/board_read.naver?nid=5">  본문   제목 </a></td>
                <td>w</td><td>3</td><td>1</td><td>0</td>
            </tr>"#
            .to_string();

        let posts = extractor().extract_posts(&page(&[row]));

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "본문 제목");
    }

    #[test]
    fn test_row_without_link_is_skipped() {
        let row = r#"<tr onmouseover="x">
                <td>2024.01.15</td>
                <td class="title">삭제된 게시물</td>
                <td>w</td><td>3</td><td>1</td><td>0</td>
            </tr>"#
            .to_string();

        assert!(extractor().extract_posts(&page(&[row])).is_empty());
    }

    #[test]
    fn test_custom_discriminator() {
        let layout = BoardLayout {
            row_selector: "tr.post".to_string(),
            ..BoardLayout::default()
        };
        let extractor = BoardExtractor::new(layout, CleaningConfig::default(), BASE).unwrap();
        let row = r#"<tr class="post">
                <td>2024.01.15</td>
                <td><a href="/p/1" title="클래스 기반">클래스 기반</a></td>
                <td>w</td><td>30</td><td>2</td><td>0</td>
            </tr>"#
            .to_string();
        let html = page(&[row, post_row(2, "hover", "1", "1")]);

        let posts = extractor.extract_posts(&html);

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].link, "https://finance.naver.com/p/1");
    }

    #[test]
    fn test_empty_document() {
        assert!(extractor().extract_posts("").is_empty());
    }
}
