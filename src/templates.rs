//! Note paths, frontmatter and fixed Markdown templates.
//!
//! Everything here is pure: callers pass the current instant in, so the
//! output is reproducible in tests.

use chrono::{DateTime, Datelike, Local, SecondsFormat, TimeZone, Utc};
use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

pub const ARTICLES_DIR: &str = "Articles";
pub const DAILY_NOTES_DIR: &str = "Daily Notes";
pub const WEEKLY_REPORTS_DIR: &str = "Weekly Reports";
pub const PROJECTS_DIR: &str = "Projects";

/// Default folder for `createNote`.
pub const DEFAULT_NOTE_FOLDER: &str = "Notes";
/// Default category for article templates.
pub const DEFAULT_CATEGORY: &str = "General";
pub const ARTICLE_AUTHOR: &str = "AI Assistant";

const WEEK_MILLIS: i64 = 7 * 24 * 3600 * 1000;

/// Templates available to `createFromTemplate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TemplateType {
    /// Article skeleton under Articles/{category}/
    Article,
    /// Weekly report under Weekly Reports/
    WeeklyReport,
    /// Project README under Projects/{slug}/
    ProjectDoc,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Article => "article",
            TemplateType::WeeklyReport => "weeklyReport",
            TemplateType::ProjectDoc => "projectDoc",
        }
    }
}

impl std::fmt::Display for TemplateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered note ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNote {
    pub path: String,
    pub content: String,
}

/// Replace every character outside `[A-Za-z0-9]` with `-`, then lowercase.
///
/// Characters outside the Basic Multilingual Plane count as two characters,
/// so an emoji becomes `--`. Paths stay stable for vaults created before.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else {
            for _ in 0..c.len_utf16() {
                slug.push('-');
            }
        }
    }
    slug
}

/// `YYYY-MM-DD` in UTC.
pub fn iso_date(now: &DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// RFC 3339 timestamp in UTC with millisecond precision, e.g. `2024-03-05T09:15:00.000Z`.
pub fn iso_timestamp(now: &DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Week of the year: `ceil((now - Jan 1 00:00) / 7 days)`.
///
/// Jan 1 00:00 is resolved in `now`'s timezone and the difference is taken
/// between instants, so a DST shift since New Year moves the boundary.
pub fn week_number<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    match now
        .timezone()
        .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .earliest()
    {
        Some(start) => weeks_between(&start, now),
        None => 0,
    }
}

fn weeks_between<A: TimeZone, B: TimeZone>(start: &DateTime<A>, now: &DateTime<B>) -> i64 {
    let elapsed = now.timestamp_millis() - start.timestamp_millis();
    (elapsed + WEEK_MILLIS - 1).div_euclid(WEEK_MILLIS)
}

/// `{folder}/{title}.md`
pub fn note_path(folder: &str, title: &str) -> String {
    format!("{}/{}.md", folder, title)
}

/// `Daily Notes/{date}.md`
pub fn daily_note_path(date: &str) -> String {
    format!("{}/{}.md", DAILY_NOTES_DIR, date)
}

/// Body of a daily note that does not exist yet.
pub fn daily_note_seed(date: &str) -> String {
    format!("# {}\n\n", date)
}

/// Append an entry to a daily note, with an optional `## {time}` header.
pub fn append_daily_entry(current: &str, content: &str, time: Option<&str>) -> String {
    let header = time.map(|t| format!("## {}\n\n", t)).unwrap_or_default();
    format!("{}\n\n{}{}", current, header, content)
}

/// Time-of-day header for daily entries, in local time.
pub fn local_time(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// `Articles/{category}/{date}-{slug}.md`
pub fn article_path(category: &str, date: &str, title: &str) -> String {
    format!("{}/{}/{}-{}.md", ARTICLES_DIR, category, date, slugify(title))
}

/// A frontmatter value. Lists render as `[a, b]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
    Number(i64),
}

impl std::fmt::Display for FrontmatterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontmatterValue::Text(text) => f.write_str(text),
            FrontmatterValue::List(items) => write!(f, "[{}]", items.join(", ")),
            FrontmatterValue::Flag(flag) => write!(f, "{}", flag),
            FrontmatterValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Render `key: value` lines between `---` fences, followed by a blank line.
///
/// Values are written verbatim, not YAML-quoted.
pub fn render_frontmatter(fields: &[(&str, FrontmatterValue)]) -> String {
    let lines = fields
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n");
    format!("---\n{}\n---\n\n", lines)
}

/// Full article body for `createArticle`.
pub fn article_note(
    title: &str,
    category: &str,
    content: &str,
    tags: &[String],
    draft: bool,
    now: &DateTime<Utc>,
) -> RenderedNote {
    let frontmatter = render_frontmatter(&[
        ("title", FrontmatterValue::Text(title.to_string())),
        ("date", FrontmatterValue::Text(iso_timestamp(now))),
        ("category", FrontmatterValue::Text(category.to_string())),
        ("tags", FrontmatterValue::List(tags.to_vec())),
        ("draft", FrontmatterValue::Flag(draft)),
        ("author", FrontmatterValue::Text(ARTICLE_AUTHOR.to_string())),
    ]);

    RenderedNote {
        path: article_path(category, &iso_date(now), title),
        content: frontmatter + content,
    }
}

/// Render a fixed template and its destination path.
pub fn render_template(
    template: TemplateType,
    title: &str,
    category: Option<&str>,
    now: &DateTime<Utc>,
) -> RenderedNote {
    match template {
        TemplateType::Article => {
            let category = category.unwrap_or(DEFAULT_CATEGORY);
            RenderedNote {
                path: format!("{}/{}/{}.md", ARTICLES_DIR, category, slugify(title)),
                content: article_template(title, category, now),
            }
        }
        TemplateType::WeeklyReport => {
            let local = now.with_timezone(&Local);
            let week = week_number(&local);
            let year = local.year();
            RenderedNote {
                path: format!("{}/{}-W{}.md", WEEKLY_REPORTS_DIR, year, week),
                content: weekly_report_template(week, year, now),
            }
        }
        TemplateType::ProjectDoc => RenderedNote {
            path: format!("{}/{}/README.md", PROJECTS_DIR, slugify(title)),
            content: project_doc_template(title, now),
        },
    }
}

fn article_template(title: &str, category: &str, now: &DateTime<Utc>) -> String {
    let frontmatter = render_frontmatter(&[
        ("title", FrontmatterValue::Text(title.to_string())),
        ("date", FrontmatterValue::Text(iso_timestamp(now))),
        ("category", FrontmatterValue::Text(category.to_string())),
        ("tags", FrontmatterValue::List(Vec::new())),
        ("draft", FrontmatterValue::Flag(true)),
    ]);
    format!(
        "{frontmatter}# {title}

## 概要

## 本文

## まとめ

## 参考リンク
"
    )
}

fn weekly_report_template(week: i64, year: i32, now: &DateTime<Utc>) -> String {
    let frontmatter = render_frontmatter(&[
        ("type", FrontmatterValue::Text("weekly-report".to_string())),
        ("week", FrontmatterValue::Number(week)),
        ("year", FrontmatterValue::Number(i64::from(year))),
        ("date", FrontmatterValue::Text(iso_timestamp(now))),
    ]);
    // Empty bullets keep their trailing space
    format!(
        "{frontmatter}# Week {week} Report - {year}

## 今週の成果

### 完了したタスク
-{sp}

### 作成した記事
-{sp}

### 学んだこと
-{sp}

## 来週の計画

## 振り返り
",
        sp = " ",
    )
}

fn project_doc_template(name: &str, now: &DateTime<Utc>) -> String {
    let frontmatter = render_frontmatter(&[
        ("project", FrontmatterValue::Text(name.to_string())),
        ("type", FrontmatterValue::Text("documentation".to_string())),
        ("created", FrontmatterValue::Text(iso_timestamp(now))),
        ("status", FrontmatterValue::Text("active".to_string())),
    ]);
    format!(
        "{frontmatter}# {name}

## 概要

## 目的

## 技術スタック

## アーキテクチャ

## セットアップ

## 使用方法

## 今後の計画
"
    )
}
