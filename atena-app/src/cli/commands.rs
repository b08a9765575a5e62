use crate::cli::opts::*;

use anyhow::{anyhow, bail, Result};
use atena_core::{
    calculate_next_review, filter_by_difficulty, filter_by_text, filter_due, CardPatch, Deck,
    DeckPatch, DeckStore, Difficulty, Flashcard, Rating,
};
use atena_json::{paths::data_root, FileStorage};
use chrono::{Local, Utc};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub fn open_store(data_dir: Option<PathBuf>) -> Result<DeckStore> {
    let storage = match data_dir {
        Some(dir) => FileStorage::open_with(dir, 10)?,
        None => FileStorage::open_with(data_root(), 10)?,
    };
    Ok(DeckStore::new(Arc::new(storage)))
}

pub fn run_cli(args: Cli) -> Result<()> {
    let store = open_store(args.data_dir)?;
    match args.cmd {
        Command::Deck(cmd) => deck_cmd(&store, cmd),
        Command::Card(cmd) => card_cmd(&store, cmd),
        Command::Review(cmd) => review_cmd(&store, cmd),
        Command::Stats { deck } => stats_cmd(&store, deck),
        Command::Due => due_cmd(&store),
        Command::Export(cmd) => export_cmd(&store, cmd),
        Command::Import(cmd) => import_cmd(&store, cmd),
        // API is routed from main with its own runtime
        Command::Api(_) => unreachable!(),
    }
}

fn deck_cmd(store: &DeckStore, cmd: DeckCmd) -> Result<()> {
    match cmd {
        DeckCmd::Add(a) => {
            // The store accepts empty titles; the CLI is the validating caller.
            if a.title.trim().is_empty() {
                bail!("deck title must not be empty");
            }
            let d = store.create_deck(&a.title, &a.description, &a.category);
            println!("{}", d.id);
        }
        DeckCmd::List => {
            let mut v = store.list_decks();
            v.sort_by_key(|d| d.created_at);
            for d in v {
                println!("{}\t{}\t{}\t{} cards", d.id, d.title, d.category, d.cards.len());
            }
        }
        DeckCmd::Show { deck } => {
            let d = resolve_deck(store, &deck)?;
            let stats = store
                .deck_stats(d.id)
                .ok_or_else(|| anyhow!("deck not found"))?;
            println!("{}\t{}", d.id, d.title);
            if !d.description.is_empty() {
                println!("{}", d.description);
            }
            println!(
                "category={}\tcards={}\tmastered={}\tdue={}\tmastery={}%",
                d.category, stats.total_cards, stats.mastered_cards, stats.cards_to_review,
                stats.mastery
            );
        }
        DeckCmd::Edit(e) => {
            let d = resolve_deck(store, &e.deck)?;
            let patch = DeckPatch {
                title: e.title,
                description: e.description,
                category: e.category,
            };
            store
                .update_deck(d.id, patch)
                .ok_or_else(|| anyhow!("deck not found"))?;
            println!("ok");
        }
        DeckCmd::Rm { deck } => {
            let d = resolve_deck(store, &deck)?;
            store.delete_deck(d.id);
            println!("ok");
        }
    }
    Ok(())
}

fn card_cmd(store: &DeckStore, cmd: CardCmd) -> Result<()> {
    match cmd {
        CardCmd::Add(a) => {
            let deck = resolve_deck(store, &a.deck)?;
            let difficulty = parse_difficulty(&a.difficulty)
                .ok_or_else(|| anyhow!("difficulty must be easy, medium, or hard"))?;
            let c = store
                .add_flashcard(deck.id, &a.front, &a.back, difficulty)
                .ok_or_else(|| anyhow!("deck not found"))?;
            println!("{}", c.id);
        }
        CardCmd::List(l) => {
            let deck = resolve_deck(store, &l.deck)?;
            let mut cards = deck.cards;
            if let Some(q) = &l.search {
                cards = filter_by_text(&cards, q);
            }
            if let Some(s) = &l.difficulty {
                let difficulty = parse_difficulty(s)
                    .ok_or_else(|| anyhow!("difficulty must be easy, medium, or hard"))?;
                cards = filter_by_difficulty(&cards, difficulty);
            }
            if l.due {
                cards = filter_due(&cards, Local::now().date_naive());
            }
            for c in cards {
                let next = c
                    .next_review
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}\t{}\t{}\t{}\tstreak={}\tnext={}",
                    c.id, c.front, c.back, c.difficulty, c.streak, next
                );
            }
        }
        CardCmd::Edit(e) => {
            let deck = resolve_deck(store, &e.deck)?;
            let card_id = parse_uuid(&e.card_id)?;
            let difficulty = match e.difficulty.as_deref() {
                Some(s) => Some(
                    parse_difficulty(s)
                        .ok_or_else(|| anyhow!("difficulty must be easy, medium, or hard"))?,
                ),
                None => None,
            };
            let patch = CardPatch {
                front: e.front,
                back: e.back,
                difficulty,
                ..CardPatch::default()
            };
            store
                .update_flashcard(deck.id, card_id, patch)
                .ok_or_else(|| anyhow!("card not found"))?;
            println!("ok");
        }
        CardCmd::Rm { deck, card_id } => {
            let deck = resolve_deck(store, &deck)?;
            let card_id = parse_uuid(&card_id)?;
            if !store.delete_flashcard(deck.id, card_id) {
                bail!("card not found");
            }
            println!("ok");
        }
    }
    Ok(())
}

fn review_cmd(store: &DeckStore, cmd: ReviewCmd) -> Result<()> {
    let today = Local::now().date_naive();

    let mut pool: Vec<(Uuid, String, Flashcard)> = match cmd.deck {
        Some(sel) => {
            let d = resolve_deck(store, &sel)?;
            d.cards
                .iter()
                .filter(|c| c.is_due(today))
                .map(|c| (d.id, d.title.clone(), c.clone()))
                .collect()
        }
        None => store
            .cards_to_review()
            .into_iter()
            .map(|d| (d.deck_id, d.deck_title, d.card))
            .collect(),
    };

    pool.sort_by_key(|(_, _, c)| (c.next_review, c.created_at));
    if pool.is_empty() {
        println!("no cards due");
        return Ok(());
    }

    let total = pool.len().min(cmd.max);
    let mut count = 0usize;
    for (deck_id, deck_title, card) in pool.into_iter().take(cmd.max) {
        count += 1;
        println!("\n[{}/{}] {}", count, total, deck_title);
        println!("Q: {}", card.front);
        prompt_enter("[enter=show]")?;
        println!("A: {}", card.back);
        println!("[1=again, 2=hard, 3=good, 4=easy, 5=perfect, s=skip, q=quit]");
        let rating = loop {
            let line = read_line("rating> ")?;
            match line.trim().to_lowercase().as_str() {
                "s" | "skip" => break None,
                "q" | "quit" => return Ok(()),
                other => match other.parse::<u8>().ok().and_then(Rating::from_score) {
                    Some(r) => break Some(r),
                    None => println!("enter 1-5, s, or q"),
                },
            }
        };

        if let Some(rating) = rating {
            let now = Utc::now();
            let outcome = calculate_next_review(card.streak, rating, now);
            store
                .update_flashcard(deck_id, card.id, CardPatch::from_outcome(&outcome, now))
                .ok_or_else(|| anyhow!("card disappeared mid-review"))?;
            println!("→ next review in {} day(s)", outcome.interval_days);
        }
    }

    println!("\nreviewed {}", count);
    Ok(())
}

fn stats_cmd(store: &DeckStore, deck: Option<String>) -> Result<()> {
    let decks = match deck {
        Some(sel) => vec![resolve_deck(store, &sel)?],
        None => {
            let mut v = store.list_decks();
            v.sort_by_key(|d| d.created_at);
            v
        }
    };
    for d in decks {
        let stats = store
            .deck_stats(d.id)
            .ok_or_else(|| anyhow!("deck not found"))?;
        println!(
            "{}\tcards={}\tmastered={}\tdue={}\tmastery={}%",
            d.title, stats.total_cards, stats.mastered_cards, stats.cards_to_review, stats.mastery
        );
    }
    Ok(())
}

fn due_cmd(store: &DeckStore) -> Result<()> {
    let due = store.cards_to_review();
    if due.is_empty() {
        println!("no cards due");
        return Ok(());
    }
    for d in due {
        println!("{}\t{}\t{}", d.deck_title, d.card.id, d.card.front);
    }
    Ok(())
}

fn export_cmd(store: &DeckStore, cmd: ExportCmd) -> Result<()> {
    match cmd {
        ExportCmd::Json { path } => {
            let mut decks = store.list_decks();
            decks.sort_by_key(|d| d.created_at);
            let bundle = ExportBundle { version: 1, decks };
            let s = serde_json::to_string_pretty(&bundle)?;
            std::fs::write(&path, s)?;
            println!("wrote {}", path.display());
        }
        ExportCmd::Csv { path, deck } => {
            let decks = match deck {
                Some(sel) => vec![resolve_deck(store, &sel)?],
                None => store.list_decks(),
            };

            let mut wtr = csv::Writer::from_path(&path)?;
            wtr.write_record(["deck", "front", "back", "difficulty"])?;
            for d in decks {
                for c in d.cards {
                    wtr.write_record([
                        d.title.clone(),
                        c.front,
                        c.back,
                        c.difficulty.to_string(),
                    ])?;
                }
            }
            wtr.flush()?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn import_cmd(store: &DeckStore, cmd: ImportCmd) -> Result<()> {
    match cmd {
        ImportCmd::Json { path } => {
            let data = std::fs::read_to_string(&path)?;
            let bundle: ExportBundle = serde_json::from_str(&data)?;
            for deck in bundle.decks {
                let created = store.create_deck(&deck.title, &deck.description, &deck.category);
                for card in deck.cards {
                    let added = store
                        .add_flashcard(created.id, &card.front, &card.back, card.difficulty)
                        .ok_or_else(|| anyhow!("deck disappeared during import"))?;
                    // carry the scheduling state over
                    if card.streak > 0 || card.last_reviewed.is_some() {
                        let patch = CardPatch {
                            streak: Some(card.streak),
                            last_reviewed: card.last_reviewed,
                            next_review: card.next_review,
                            ..CardPatch::default()
                        };
                        store
                            .update_flashcard(created.id, added.id, patch)
                            .ok_or_else(|| anyhow!("card disappeared during import"))?;
                    }
                }
            }
            println!("imported");
        }
        ImportCmd::Csv { path, deck } => {
            let mut rdr = csv::Reader::from_path(&path)?;
            let target = match deck {
                Some(sel) => Some(resolve_deck(store, &sel)?),
                None => None,
            };
            for rec in rdr.records() {
                let rec = rec?;
                let deck_title = rec.get(0).unwrap_or("").trim();
                let front = rec.get(1).unwrap_or("");
                let back = rec.get(2).unwrap_or("");
                let difficulty = rec
                    .get(3)
                    .and_then(parse_difficulty)
                    .unwrap_or_default();

                let deck_obj = match &target {
                    Some(d) => d.clone(),
                    None => ensure_deck_by_title(store, deck_title)?,
                };
                store
                    .add_flashcard(deck_obj.id, front, back, difficulty)
                    .ok_or_else(|| anyhow!("deck not found"))?;
            }
            println!("imported");
        }
    }
    Ok(())
}

// ===== Helpers =====

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|_| anyhow!("invalid uuid"))
}

pub fn parse_difficulty(s: &str) -> Option<Difficulty> {
    match s.to_lowercase().as_str() {
        "e" | "easy" => Some(Difficulty::Easy),
        "m" | "med" | "medium" => Some(Difficulty::Medium),
        "h" | "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

fn resolve_deck(store: &DeckStore, sel: &str) -> Result<Deck> {
    if let Ok(id) = Uuid::parse_str(sel) {
        if let Some(d) = store.get_deck(id) {
            return Ok(d);
        }
    }
    let decks = store.list_decks();
    if let Some(d) = decks.into_iter().find(|d| d.title.eq_ignore_ascii_case(sel)) {
        return Ok(d);
    }
    bail!("deck not found: {}", sel)
}

fn ensure_deck_by_title(store: &DeckStore, title: &str) -> Result<Deck> {
    let decks = store.list_decks();
    if let Some(d) = decks.into_iter().find(|d| d.title.eq_ignore_ascii_case(title)) {
        return Ok(d);
    }
    Ok(store.create_deck(title, "", ""))
}

fn prompt_enter(label: &str) -> Result<()> { print!("{label}"); stdout().flush().ok(); let mut s = String::new(); stdin().read_line(&mut s)?; Ok(()) }
fn read_line(prompt: &str) -> Result<String> { print!("{prompt}"); stdout().flush().ok(); let mut s = String::new(); stdin().read_line(&mut s)?; Ok(s) }

#[derive(serde::Serialize, serde::Deserialize)]
struct ExportBundle {
    version: u32,
    decks: Vec<Deck>,
}
