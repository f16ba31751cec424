//! Interactive catalog session: one command per line, state re-rendered
//! after every command.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use catalog_core::{CatalogController, Transport};

use crate::view;

pub const HELP: &str = "\
commands:
  search <text>              filter by name (empty text clears)
  clear                      clear the search
  instock on|off             only show products in stock
  more                       load the next page
  add <name> <price> [instock]
  save <id>                  toggle the saved flag
  delete <id>
  help
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    InStock(bool),
    More,
    Add { name: String, price: f64, in_stock: bool },
    Save(u64),
    Delete(u64),
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match word {
        "search" => Ok(Command::Search(rest.to_string())),
        "clear" => Ok(Command::Search(String::new())),
        "instock" => match rest {
            "on" => Ok(Command::InStock(true)),
            "off" => Ok(Command::InStock(false)),
            other => bail!("expected `on` or `off`, got {other:?}"),
        },
        "more" => Ok(Command::More),
        "add" => parse_add(rest),
        "save" => Ok(Command::Save(parse_id(rest)?)),
        "delete" => Ok(Command::Delete(parse_id(rest)?)),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "" => bail!("empty command"),
        other => bail!("unknown command {other:?} (try `help`)"),
    }
}

/// `add <name...> <price> [instock]`; the name may contain spaces.
fn parse_add(rest: &str) -> Result<Command> {
    let mut words: Vec<&str> = rest.split_whitespace().collect();
    let in_stock = words.last() == Some(&"instock");
    if in_stock {
        words.pop();
    }
    let price = words
        .pop()
        .ok_or_else(|| anyhow!("usage: add <name> <price> [instock]"))?;
    let price: f64 = price
        .parse()
        .with_context(|| format!("invalid price {price:?}"))?;
    Ok(Command::Add {
        name: words.join(" "),
        price,
        in_stock,
    })
}

fn parse_id(rest: &str) -> Result<u64> {
    rest.parse()
        .with_context(|| format!("invalid product id {rest:?}"))
}

/// Apply one command. Returns `false` when the session should end.
pub fn apply<T: Transport>(
    catalog: &mut CatalogController,
    http: &mut T,
    command: Command,
) -> bool {
    match command {
        Command::Search(text) => {
            let pending = catalog.set_search_query(text);
            catalog.run_opt(pending, http);
        }
        Command::InStock(on) => {
            let pending = catalog.set_in_stock_only(on);
            catalog.run_opt(pending, http);
        }
        Command::More => {
            let pending = catalog.load_more();
            catalog.run_opt(pending, http);
        }
        Command::Add { name, price, in_stock } => {
            let pending = catalog.add_product(&name, price, in_stock);
            catalog.run_opt(pending, http);
        }
        Command::Save(id) => {
            let pending = catalog.toggle_saved(id);
            catalog.run(pending, http);
        }
        Command::Delete(id) => {
            let pending = catalog.delete_product(id);
            catalog.run(pending, http);
        }
        Command::Help => {}
        Command::Quit => return false,
    }
    true
}

pub fn run<T: Transport>(
    catalog: &mut CatalogController,
    http: &mut T,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    let pending = catalog.mount();
    catalog.run_opt(pending, http);
    write!(output, "{}", view::render(catalog.state()))?;
    writeln!(output, "type `help` for commands")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(Command::Help) => writeln!(output, "{HELP}")?,
            Ok(command) => {
                if !apply(catalog, http, command) {
                    break;
                }
                write!(output, "{}", view::render(catalog.state()))?;
            }
            Err(err) => writeln!(output, "{err:#}")?,
        }
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use catalog_core::{ApiError, HttpRequest, HttpResponse, ProductClient};

    use super::*;

    #[test]
    fn parses_add_with_multi_word_name() {
        assert_eq!(
            parse("add Standing Desk 449 instock").unwrap(),
            Command::Add {
                name: "Standing Desk".to_string(),
                price: 449.0,
                in_stock: true,
            }
        );
        assert_eq!(
            parse("add Lamp 12.5").unwrap(),
            Command::Add {
                name: "Lamp".to_string(),
                price: 12.5,
                in_stock: false,
            }
        );
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse("search oak chair").unwrap(), Command::Search("oak chair".into()));
        assert_eq!(parse("clear").unwrap(), Command::Search(String::new()));
        assert_eq!(parse("instock on").unwrap(), Command::InStock(true));
        assert_eq!(parse("  more ").unwrap(), Command::More);
        assert_eq!(parse("save 4").unwrap(), Command::Save(4));
        assert_eq!(parse("delete 9").unwrap(), Command::Delete(9));
        assert_eq!(parse("q").unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse("instock maybe").is_err());
        assert!(parse("save abc").is_err());
        assert!(parse("add Lamp cheap").is_err());
        assert!(parse("dance").is_err());
    }

    struct Canned(VecDeque<HttpResponse>);

    impl Transport for Canned {
        fn execute(&mut self, _req: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.0
                .pop_front()
                .ok_or_else(|| ApiError::transport("no canned response"))
        }
    }

    #[test]
    fn session_renders_after_each_command() {
        let page = serde_json::json!({
            "products": [{ "id": 1, "name": "Oak Chair", "price": 89.0, "inStock": true, "saved": false }],
            "pagination": { "hasMore": false, "page": 1 },
        });
        let saved = r#"{"id":1,"name":"Oak Chair","price":89.0,"inStock":true,"saved":true}"#;
        let mut http = Canned(VecDeque::from([
            HttpResponse::new(200, page.to_string()),
            HttpResponse::new(200, saved),
        ]));
        let mut catalog = CatalogController::new(ProductClient::new("http://api.test"));
        let mut out = Vec::new();

        run(&mut catalog, &mut http, "save 1\nquit\nsave 1\n".as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Oak Chair"));
        assert!(text.contains("[saved]"));
        assert!(catalog.state().products[0].saved);
        assert!(http.0.is_empty());
    }
}
