use serde::{Deserialize, Deserializer, Serialize};

/*
Object {
    "categories": Object { "category": Array [String("Action"), String("Adventure")] },
    "slug": String("the-legend-of-zelda-breath-of-the-wild-switch"),
    "buyitnow": String("true"),
    "release_date": String("Mar 3, 2017"),
    "digitaldownload": String("false"),
    "free_to_start": String("false"),
    "title": String("The Legend of Zelda: Breath of the Wild"),
    "system": String("Nintendo Switch"),
    "id": String("..."),
    "ca_price": String("79.99"),
    "number_of_players": String("1 player"),
    "nsuid": String("70010000000025"),
    "eshop_price": String("59.99"),
    "front_box_art": String("https://..."),
    "game_code": String("HACPAAAAA"),
    "buyonline": String("true"),
}
*/
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    pub categories: Categories,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(rename = "buyitnow", deserialize_with = "null_as_default")]
    pub buy_it_now: String,
    #[serde(deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(rename = "digitaldownload", deserialize_with = "null_as_default")]
    pub digital_download: String,
    #[serde(deserialize_with = "null_as_default")]
    pub free_to_start: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub system: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ca_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_players: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nsuid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub eshop_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub front_box_art: String,
    #[serde(deserialize_with = "null_as_default")]
    pub game_code: String,
    #[serde(rename = "buyonline", deserialize_with = "null_as_default")]
    pub buy_online: String,
}

/// The feed changes the shape of `category` between entries (string, list of
/// strings, nested objects), so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Categories {
    pub category: serde_json::Value,
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct GamesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub filter: Filter,
    #[serde(default, deserialize_with = "null_as_default")]
    pub games: Games,
}

/// A page without a total counts as the end of the catalog.
#[derive(Debug, Default, Deserialize)]
pub struct Filter {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct Games {
    #[serde(default, deserialize_with = "null_as_default")]
    pub game: Vec<Game>,
}

/// One batch of listings together with the catalog size reported alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub games: Vec<Game>,
    pub total: usize,
}

impl From<GamesResponse> for Page {
    fn from(value: GamesResponse) -> Self {
        Self {
            games: value.games.game,
            total: value.filter.total,
        }
    }
}
