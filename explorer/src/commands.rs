use common::types::lat_lng::LatLng;
use common::types::shop::{MenuItem, VendorStatus};

pub const HELP: &str = "\
  <text>                                  ask the assistant
  /list                                   all shops
  /find <query>                           shops whose name or address matches
  /nearby                                 shops closest to the pin
  /open <shop-id>                         click a shop marker
  /close                                  close the shop view
  /pin <lat> <lng>                        move the location pin
  /register                               open the vendor form
  /vendor <name> | <address> | <item:price, ...>
                                          submit the vendor form at the pin
  /cancel                                 close the vendor form
  /status <vendor-id> online|offline      change a vendor's status
  /clear                                  clear the conversation
  /help                                   this text
  /quit                                   exit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Chat(String),
    List,
    Find(String),
    Nearby,
    Open(String),
    Close,
    Pin(LatLng),
    Register,
    Vendor {
        name: String,
        address: String,
        menu: Vec<MenuItem>,
    },
    Cancel,
    Status {
        shop_id: String,
        status: VendorStatus,
    },
    Clear,
    Help,
    Quit,
}

/// Lines starting with `/` are commands; anything else is chat text.
/// Blank vendor fields are passed through so the form can report them.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Chat(line.to_string()));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "list" => Ok(Command::List),
        "find" => Ok(Command::Find(args.to_string())),
        "nearby" => Ok(Command::Nearby),
        "open" if !args.is_empty() => Ok(Command::Open(args.to_string())),
        "open" => Err("usage: /open <shop-id>".to_string()),
        "close" => Ok(Command::Close),
        "pin" => parse_pin(args).map(Command::Pin),
        "register" => Ok(Command::Register),
        "vendor" => parse_vendor(args),
        "cancel" => Ok(Command::Cancel),
        "status" => parse_status(args),
        "clear" => Ok(Command::Clear),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command /{other}, try /help")),
    }
}

fn parse_pin(args: &str) -> Result<LatLng, String> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [lat, lng] => {
            let lat = lat.parse::<f64>().map_err(|_| format!("'{lat}' is not a latitude"))?;
            let lng = lng.parse::<f64>().map_err(|_| format!("'{lng}' is not a longitude"))?;
            Ok(LatLng::new(lat, lng))
        }
        _ => Err("usage: /pin <lat> <lng>".to_string()),
    }
}

fn parse_vendor(args: &str) -> Result<Command, String> {
    let mut fields = args.splitn(3, '|').map(str::trim);
    let name = fields.next().unwrap_or_default().to_string();
    let address = fields.next().unwrap_or_default().to_string();
    let menu = parse_menu(fields.next().unwrap_or_default())?;
    Ok(Command::Vendor {
        name,
        address,
        menu,
    })
}

/// `Idli:10, Vada:12.5`. Blank entries are skipped.
pub fn parse_menu(raw: &str) -> Result<Vec<MenuItem>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<MenuItem, String> {
            let (name, price) = entry
                .rsplit_once(':')
                .ok_or_else(|| format!("menu entry '{entry}' needs a price, like 'Idli:10'"))?;
            let price = price
                .trim()
                .trim_start_matches('₹')
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a price", price.trim()))?;
            Ok(MenuItem {
                name: name.trim().to_string(),
                price,
            })
        })
        .collect()
}

fn parse_status(args: &str) -> Result<Command, String> {
    match args.split_whitespace().collect::<Vec<_>>().as_slice() {
        [shop_id, status] => Ok(Command::Status {
            shop_id: shop_id.to_string(),
            status: status.parse()?,
        }),
        _ => Err("usage: /status <vendor-id> online|offline".to_string()),
    }
}
