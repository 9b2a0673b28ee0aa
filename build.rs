// Reenvía la configuración de Picognito desde .env a `option_env!`.
// Solo se aceptan las claves conocidas y con valores válidos; el resto
// se avisa y se ignora para que `AppConfig::from_env` use sus defaults.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy)]
enum Kind {
    Text,
    Url,
    Flag,
    Latitude,
    Longitude,
    Zoom,
    BatchSize,
    Degrees,
    Policy,
}

const KEYS: &[(&str, Kind)] = &[
    ("UNSPLASH_API_URL", Kind::Url),
    ("UNSPLASH_ACCESS_KEY", Kind::Text),
    ("ENABLE_LOGGING", Kind::Flag),
    ("DEFAULT_MAP_CENTER_LAT", Kind::Latitude),
    ("DEFAULT_MAP_CENTER_LNG", Kind::Longitude),
    ("DEFAULT_MAP_ZOOM", Kind::Zoom),
    ("RECENTER_ZOOM", Kind::Zoom),
    ("PHOTO_BATCH_SIZE", Kind::BatchSize),
    ("JITTER_DEGREES", Kind::Degrees),
    ("MISSING_LOCATION_POLICY", Kind::Policy),
];

fn check(kind: Kind, value: &str) -> Result<(), String> {
    let number = |v: &str| v.parse::<f64>().map_err(|_| format!("'{}' is not a number", v));
    match kind {
        Kind::Text => Ok(()),
        Kind::Url if value.starts_with("https://") || value.starts_with("http://") => Ok(()),
        Kind::Url => Err(format!("'{}' is not an http(s) URL", value)),
        Kind::Flag => value.parse::<bool>().map(|_| ()).map_err(|_| format!("'{}' is not true/false", value)),
        Kind::Latitude => number(value).and_then(|n| in_range(n, -90.0, 90.0)),
        Kind::Longitude => number(value).and_then(|n| in_range(n, -180.0, 180.0)),
        Kind::Zoom => number(value).and_then(|n| in_range(n, 0.0, 19.0)),
        Kind::Degrees => number(value).and_then(|n| in_range(n, 0.0, 1.0)),
        Kind::BatchSize => match value.parse::<usize>() {
            Ok(n) if (1..=5).contains(&n) => Ok(()),
            _ => Err(format!("'{}' is not a batch size in 1..=5", value)),
        },
        Kind::Policy => match value.to_ascii_lowercase().as_str() {
            "jitter" | "skip" => Ok(()),
            _ => Err(format!("'{}' is not jitter/skip", value)),
        },
    }
}

fn in_range(n: f64, min: f64, max: f64) -> Result<(), String> {
    if (min..=max).contains(&n) {
        Ok(())
    } else {
        Err(format!("{} is outside {}..={}", n, min, max))
    }
}

fn parse_env_file(contents: &str) -> BTreeMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim().trim_start_matches("export ").trim();
            (key.to_string(), value.trim().trim_matches('"').to_string())
        })
        .collect()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    let env_file = Path::new(".env");
    let from_file = match fs::read_to_string(env_file) {
        Ok(contents) => parse_env_file(&contents),
        Err(_) => {
            println!("cargo:warning=No .env file found. Copy .env.example to .env; sample photos will be used until UNSPLASH_ACCESS_KEY is set.");
            BTreeMap::new()
        }
    };

    for key in from_file.keys() {
        if !KEYS.iter().any(|(known, _)| known == key) {
            println!("cargo:warning=.env: unknown key {} ignored", key);
        }
    }

    for (key, kind) in KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
        // Una variable ya exportada gana al .env y cargo ya la ve
        if env::var(key).is_ok() {
            continue;
        }
        let Some(value) = from_file.get(*key) else {
            continue;
        };
        match check(*kind, value) {
            Ok(()) => println!("cargo:rustc-env={}={}", key, value),
            Err(reason) => println!("cargo:warning=.env: {} ignored ({})", key, reason),
        }
    }
}
