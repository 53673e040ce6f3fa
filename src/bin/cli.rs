//! mapwire CLI
//!
//! Encodes map operations from the command line and prints the wire bytes
//! alongside a decode of the payload for inspection.
//!
//! Values are given as JSON literals (`5`, `3.5`, `"text"`, `[1, 2]`,
//! `{"a": 1}`, `null`); anything that fails to parse as JSON is taken as a
//! plain string.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use mapwire::maps::{self, MapOpcode};
use mapwire::packer::unpack_payload;
use mapwire::{MapOperation, MapOrder, MapPolicy, MapReturnType, MapWriteMode, Value};

/// mapwire CLI
#[derive(Parser, Debug)]
#[command(name = "mapwire-cli")]
#[command(about = "Encode server-side map operations and inspect the wire bytes")]
#[command(version)]
struct Args {
    /// Target bin name
    #[arg(short, long, default_value = "m")]
    bin: String,

    /// Map order attribute for write operations
    #[arg(long, value_enum, default_value_t = OrderArg::Unordered)]
    order: OrderArg,

    /// Write mode for put operations
    #[arg(long, value_enum, default_value_t = ModeArg::Update)]
    mode: ModeArg,

    /// Return type for remove/get operations
    #[arg(long, value_enum, default_value_t = ReturnTypeArg::Value)]
    return_type: ReturnTypeArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a single key/value item
    Put {
        /// Map key
        key: String,

        /// Value to store
        value: String,
    },

    /// Write multiple items given as key=value pairs
    PutItems {
        /// Items in encode order
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Increment a numeric value by a delta
    Increment {
        /// Map key
        key: String,

        /// Amount to add
        delta: String,
    },

    /// Remove all items from the map
    Clear,

    /// Read the number of items in the map
    Size,

    /// Set the map's order attributes
    SetPolicy,

    /// Remove the item with the given key
    RemoveByKey {
        /// Map key
        key: String,
    },

    /// Read the item with the given key
    GetByKey {
        /// Map key
        key: String,
    },

    /// Read items with keys in [begin, end)
    GetByKeyRange {
        /// Inclusive lower bound
        #[arg(long)]
        begin: Option<String>,

        /// Exclusive upper bound
        #[arg(long)]
        end: Option<String>,
    },

    /// Read items starting at an index
    GetByIndexRange {
        /// Start index (negative counts from the end)
        #[arg(allow_negative_numbers = true)]
        index: i64,

        /// Number of items to select
        #[arg(long)]
        count: Option<i64>,
    },

    /// Read items starting at a rank
    GetByRankRange {
        /// Start rank (negative counts from the end)
        #[arg(allow_negative_numbers = true)]
        rank: i64,

        /// Number of items to select
        #[arg(long)]
        count: Option<i64>,
    },
}

/// Map order attribute
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    Unordered,
    KeyOrdered,
    KeyValueOrdered,
}

impl From<OrderArg> for MapOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Unordered => MapOrder::Unordered,
            OrderArg::KeyOrdered => MapOrder::KeyOrdered,
            OrderArg::KeyValueOrdered => MapOrder::KeyValueOrdered,
        }
    }
}

/// Write mode for put operations
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Update,
    UpdateOnly,
    CreateOnly,
}

impl From<ModeArg> for MapWriteMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Update => MapWriteMode::Update,
            ModeArg::UpdateOnly => MapWriteMode::UpdateOnly,
            ModeArg::CreateOnly => MapWriteMode::CreateOnly,
        }
    }
}

/// Return type for remove/get operations
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReturnTypeArg {
    None,
    Index,
    ReverseIndex,
    Rank,
    ReverseRank,
    Count,
    Key,
    Value,
    KeyValue,
}

impl From<ReturnTypeArg> for MapReturnType {
    fn from(rt: ReturnTypeArg) -> Self {
        match rt {
            ReturnTypeArg::None => MapReturnType::None,
            ReturnTypeArg::Index => MapReturnType::Index,
            ReturnTypeArg::ReverseIndex => MapReturnType::ReverseIndex,
            ReturnTypeArg::Rank => MapReturnType::Rank,
            ReturnTypeArg::ReverseRank => MapReturnType::ReverseRank,
            ReturnTypeArg::Count => MapReturnType::Count,
            ReturnTypeArg::Key => MapReturnType::Key,
            ReturnTypeArg::Value => MapReturnType::Value,
            ReturnTypeArg::KeyValue => MapReturnType::KeyValue,
        }
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mapwire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    let policy = MapPolicy::new(args.order.into(), args.mode.into());
    let return_type: MapReturnType = args.return_type.into();

    let op = match &args.command {
        Commands::Put { key, value } => {
            maps::put(&policy, &args.bin, &parse_value(key), &parse_value(value))
        }
        Commands::PutItems { items } => {
            let items = match parse_items(items) {
                Ok(items) => items,
                Err(e) => {
                    tracing::error!("Invalid items: {}", e);
                    std::process::exit(1);
                }
            };
            maps::put_items(&policy, &args.bin, &items)
        }
        Commands::Increment { key, delta } => {
            maps::increment(&policy, &args.bin, &parse_value(key), &parse_value(delta))
        }
        Commands::Clear => maps::clear(&args.bin),
        Commands::Size => maps::size(&args.bin),
        Commands::SetPolicy => maps::set_policy(&policy, &args.bin),
        Commands::RemoveByKey { key } => {
            maps::remove_by_key(&args.bin, &parse_value(key), return_type)
        }
        Commands::GetByKey { key } => maps::get_by_key(&args.bin, &parse_value(key), return_type),
        Commands::GetByKeyRange { begin, end } => {
            if begin.is_none() && end.is_none() {
                tracing::error!("Key range requires at least one of --begin/--end");
                std::process::exit(1);
            }
            let begin = begin.as_deref().map(parse_value);
            let end = end.as_deref().map(parse_value);
            maps::get_by_key_range(&args.bin, begin.as_ref(), end.as_ref(), return_type)
        }
        Commands::GetByIndexRange { index, count } => match count {
            Some(count) => maps::get_by_index_range_count(&args.bin, *index, *count, return_type),
            None => maps::get_by_index_range(&args.bin, *index, return_type),
        },
        Commands::GetByRankRange { rank, count } => match count {
            Some(count) => maps::get_by_rank_range_count(&args.bin, *rank, *count, return_type),
            None => maps::get_by_rank_range(&args.bin, *rank, return_type),
        },
    };

    print_operation(&op);
}

/// Print the encoded operation and a decode of its payload
fn print_operation(op: &MapOperation) {
    println!("class:   {:?}", op.op_type);
    println!("bin:     {}", op.bin);
    println!("payload: {} bytes", op.payload.len());
    println!("hex:     {}", hex_string(&op.payload));

    match unpack_payload(&op.payload) {
        Ok((code, args)) => {
            match MapOpcode::try_from(code) {
                Ok(opcode) => println!("opcode:  {:?} ({})", opcode, code),
                Err(_) => println!("opcode:  unknown ({})", code),
            }
            for (i, arg) in args.iter().enumerate() {
                println!("arg[{}]:  {}", i, arg);
            }
        }
        Err(e) => {
            tracing::error!("Failed to decode payload: {}", e);
            std::process::exit(1);
        }
    }
}

/// Parse a CLI value literal, falling back to a plain string
fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => json_to_value(json),
        Err(_) => Value::Str(raw.to_string()),
    }
}

fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(0.0)),
        },
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Value::Str(k), json_to_value(v)))
                .collect(),
        ),
    }
}

/// Split key=value pairs, keeping CLI order
fn parse_items(pairs: &[String]) -> Result<Vec<(Value, Value)>, String> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, got '{}'", pair))?;
            Ok((parse_value(key), parse_value(value)))
        })
        .collect()
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
