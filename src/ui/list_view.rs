use anyhow::{bail, Result};
use std::fmt::Write;

use crate::domain::house::HouseId;
use crate::services::app::{HouseApp, Intent};
use crate::ui::row_cache::RowRenderCache;

pub const HELP: &str = "Commands: search <text> | rm <id> | add | list | help | quit";

/// A line typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Remove(HouseId),
    Add,
    List,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        match word.to_lowercase().as_str() {
            // Keep the raw text, a controlled input sees every character
            "search" | "s" => Ok(Command::Search(rest.to_string())),
            "rm" | "delete" => match rest.trim().parse::<HouseId>() {
                Ok(id) => Ok(Command::Remove(id)),
                Err(_) => bail!("Expected a listing id, got {:?}", rest.trim()),
            },
            "add" => Ok(Command::Add),
            "list" | "ls" | "" => Ok(Command::List),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => bail!("Unknown command {:?}. {}", other, HELP),
        }
    }

    pub fn into_intent(self) -> Option<Intent> {
        match self {
            Command::Search(text) => Some(Intent::QueryChanged(text)),
            Command::Remove(id) => Some(Intent::Remove(id)),
            Command::Add => Some(Intent::AddPlaceholder),
            Command::Quit => Some(Intent::Shutdown),
            Command::List | Command::Help => None,
        }
    }
}

/// Plain-text rendering of the listing table.
#[derive(Debug, Default)]
pub struct HouseListView {
    rows: RowRenderCache,
}

impl HouseListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, app: &HouseApp) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Houses currently on the market");
        let _ = writeln!(out, "Searching for: {}", app.query());

        if !app.is_loaded() {
            let _ = writeln!(out, "Loading...");
            return out;
        }

        let houses = app.filtered();
        self.rows.retain(app.listings().houses());

        let _ = writeln!(
            out,
            "{:>4}  {:<28}  {:<14}  {:>18}",
            "Id", "Address", "Country", "Asking Price"
        );
        for house in &houses {
            let _ = writeln!(out, "{}", self.rows.render(house));
        }
        if houses.is_empty() {
            let _ = writeln!(out, "(no listings match)");
        }
        out
    }

    pub fn rows(&self) -> &RowRenderCache {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::house::House;
    use crate::repository::MemoryKeyValueStorage;
    use std::sync::Arc;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("search usa").unwrap(),
            Command::Search("usa".into())
        );
        assert_eq!(
            Command::parse("search  new zealand").unwrap(),
            Command::Search(" new zealand".into())
        );
        assert_eq!(Command::parse("search").unwrap(), Command::Search(String::new()));
        assert_eq!(Command::parse("rm 3\n").unwrap(), Command::Remove(HouseId(3)));
        assert_eq!(Command::parse("add").unwrap(), Command::Add);
        assert_eq!(Command::parse("").unwrap(), Command::List);
        assert_eq!(Command::parse("QUIT").unwrap(), Command::Quit);

        assert!(Command::parse("rm abc").is_err());
        assert!(Command::parse("sell 3").is_err());
    }

    #[test]
    fn test_into_intent() {
        assert_eq!(
            Command::Remove(HouseId(2)).into_intent(),
            Some(Intent::Remove(HouseId(2)))
        );
        assert_eq!(Command::Add.into_intent(), Some(Intent::AddPlaceholder));
        assert_eq!(Command::List.into_intent(), None);
    }

    #[tokio::test]
    async fn test_render_loading_then_rows() {
        let mut app = HouseApp::init(Arc::new(MemoryKeyValueStorage::new()))
            .await
            .unwrap();
        let mut view = HouseListView::new();

        assert!(view.render(&app).contains("Loading..."));

        app.apply(Intent::Loaded(vec![
            House::new(1, "A", "USA", 100.0),
            House::new(2, "B", "France", 200.0),
        ]))
        .await
        .unwrap();
        app.apply(Intent::QueryChanged("fr".into())).await.unwrap();

        let screen = view.render(&app);
        assert!(screen.contains("Searching for: fr"));
        assert!(screen.contains("France"));
        assert!(!screen.contains("USA"));
        assert!(screen.contains("$200.00"));
    }

    #[tokio::test]
    async fn test_rerender_skips_unchanged_rows() {
        let mut app = HouseApp::init(Arc::new(MemoryKeyValueStorage::new()))
            .await
            .unwrap();
        app.apply(Intent::Loaded(vec![House::new(1, "A", "USA", 100.0)]))
            .await
            .unwrap();
        let mut view = HouseListView::new();

        view.render(&app);
        app.apply(Intent::AddPlaceholder).await.unwrap();
        view.render(&app);

        // Only the added row was rendered the second time
        assert_eq!(view.rows().misses(), 2);
        assert_eq!(view.rows().hits(), 1);
    }
}
