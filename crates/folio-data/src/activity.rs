//! Recent activity feed from the homepage backend (games, music, books)

use serde::{Deserialize, Serialize};

use crate::error::DataResult;
use crate::http_adapter::ApiClient;

/// Normalized entry shown in the activity widgets
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub title: String,
    pub link: String,
    pub image_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentLists {
    pub games: Vec<ListItem>,
    pub songs: Vec<ListItem>,
    pub books: Vec<ListItem>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SteamGame {
    pub appid: u64,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: Artist,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BookImage {
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Book {
    pub title: String,
    pub image: BookImage,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BookResult {
    pub book: Book,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Recents {
    recently_played_games: Vec<SteamGame>,
    recently_listed_to_song: Vec<Track>,
    currently_reading: Vec<BookResult>,
}

impl From<&SteamGame> for ListItem {
    fn from(game: &SteamGame) -> Self {
        Self {
            title: game.name.clone(),
            link: format!("https://store.steampowered.com/app/{}", game.appid),
            image_url: format!(
                "https://steamcdn-a.akamaihd.net/steam/apps/{}/library_600x900_2x.jpg",
                game.appid
            ),
        }
    }
}

impl From<&Track> for ListItem {
    fn from(track: &Track) -> Self {
        Self {
            title: track.name.clone(),
            link: track.url.clone(),
            image_url: track.image.clone().unwrap_or_default(),
        }
    }
}

impl From<&BookResult> for ListItem {
    fn from(result: &BookResult) -> Self {
        Self {
            title: result.book.title.clone(),
            link: String::new(),
            image_url: result.book.image.url.clone(),
        }
    }
}

/// Drop repeated plays of the same song, keeping the first occurrence.
///
/// Two tracks are the same when title and artist match ignoring case.
pub fn unique_tracks(tracks: &[Track]) -> Vec<&Track> {
    let mut seen = std::collections::HashSet::new();
    tracks
        .iter()
        .filter(|t| seen.insert((t.name.to_lowercase(), t.artist.name.to_lowercase())))
        .collect()
}

fn track_items(tracks: &[Track]) -> Vec<ListItem> {
    unique_tracks(tracks).into_iter().map(ListItem::from).collect()
}

/// Client for the activity endpoints of the homepage backend
pub struct ActivityClient<'a> {
    client: &'a ApiClient,
}

impl<'a> ActivityClient<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All three lists in one request
    pub async fn recent_interests(&self) -> DataResult<RecentLists> {
        let url = self.client.backend_endpoint("/interests/recent", &[])?;
        let recent: Recents = self.client.get_json(&url).await?;

        let lists = RecentLists {
            games: recent.recently_played_games.iter().map(ListItem::from).collect(),
            songs: track_items(&recent.recently_listed_to_song),
            books: recent.currently_reading.iter().map(ListItem::from).collect(),
        };
        tracing::info!(
            "Loaded activity: {} games, {} songs, {} books",
            lists.games.len(),
            lists.songs.len(),
            lists.books.len()
        );
        Ok(lists)
    }

    pub async fn recently_played_games(&self) -> DataResult<Vec<ListItem>> {
        let url = self.client.backend_endpoint("/steam/recently-played", &[])?;
        let games: Vec<SteamGame> = self.client.get_json(&url).await?;
        Ok(games.iter().map(ListItem::from).collect())
    }

    pub async fn recently_played_tracks(&self) -> DataResult<Vec<ListItem>> {
        let url = self.client.backend_endpoint("/music/recently-played", &[])?;
        let tracks: Vec<Track> = self.client.get_json(&url).await?;
        Ok(track_items(&tracks))
    }

    pub async fn currently_reading(&self) -> DataResult<Vec<ListItem>> {
        let url = self.client.backend_endpoint("/books/currentlyReading", &[])?;
        let books: Vec<BookResult> = self.client.get_json(&url).await?;
        Ok(books.iter().map(ListItem::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::error::DataError;

    fn client_for(server: &mockito::Server) -> ApiClient {
        let config = SiteConfig {
            backend_url: server.url(),
            ..SiteConfig::default()
        };
        ApiClient::new(config).unwrap()
    }

    const TRACKS: &str = r#"[
        {"name": "Teardrop", "artist": {"name": "Massive Attack"}, "url": "https://last.fm/1", "image": "a.jpg"},
        {"name": "TEARDROP", "artist": {"name": "massive attack"}, "url": "https://last.fm/2", "image": null},
        {"name": "Teardrop", "artist": {"name": "Newton Faulkner"}, "url": "https://last.fm/3"},
        {"name": "Angel", "artist": {"name": "Massive Attack"}, "url": "https://last.fm/4", "image": null}
    ]"#;

    #[test]
    fn test_unique_tracks_case_insensitive_first_wins() {
        let tracks: Vec<Track> = serde_json::from_str(TRACKS).unwrap();
        let items = track_items(&tracks);

        let links: Vec<_> = items.iter().map(|i| i.link.as_str()).collect();
        assert_eq!(links, vec!["https://last.fm/1", "https://last.fm/3", "https://last.fm/4"]);
        assert_eq!(items[0].image_url, "a.jpg");
        assert_eq!(items[2].image_url, "");
    }

    #[test]
    fn test_game_links() {
        let game = SteamGame {
            appid: 620,
            name: "Portal 2".to_string(),
        };
        let item = ListItem::from(&game);
        assert_eq!(item.link, "https://store.steampowered.com/app/620");
        assert_eq!(
            item.image_url,
            "https://steamcdn-a.akamaihd.net/steam/apps/620/library_600x900_2x.jpg"
        );
    }

    #[tokio::test]
    async fn test_recent_interests() {
        let mut server = mockito::Server::new_async().await;
        let body = format!(
            r#"{{
                "recentlyPlayedGames": [{{"appid": 620, "name": "Portal 2", "playtime_forever": 1200}}],
                "recentlyListedToSong": {TRACKS},
                "currentlyReading": [{{"book_id": 9, "book": {{"title": "Dune", "image": {{"url": "dune.jpg"}}}}}}]
            }}"#
        );
        let mock = server
            .mock("GET", "/interests/recent")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = client_for(&server);
        let lists = ActivityClient::new(&client).recent_interests().await.unwrap();

        assert_eq!(lists.games.len(), 1);
        assert_eq!(lists.songs.len(), 3);
        assert_eq!(
            lists.books,
            vec![ListItem {
                title: "Dune".to_string(),
                link: String::new(),
                image_url: "dune.jpg".to_string(),
            }]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_books_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/books/currentlyReading")
            .with_status(200)
            .with_body(r#"[{"book": {"title": "Untitled"}}]"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = ActivityClient::new(&client).currently_reading().await.unwrap_err();
        assert!(matches!(err, DataError::Schema { .. }));
    }
}
