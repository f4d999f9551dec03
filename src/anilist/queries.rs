//! GraphQL documents forwarded to the AniList API.
//!
//! These are fixed documents; the endpoints around them are pure
//! passthrough translation with no state.

/// Search media by title.
pub const SEARCH_MEDIA: &str = r#"
    query ($search: String!) {
        Page {
            media(search: $search, type: ANIME) {
                id
                title {
                    romaji
                    english
                }
                coverImage {
                    extraLarge
                }
                bannerImage
                episodes
                status
                description
                seasonYear
                nextAiringEpisode {
                    airingAt
                    timeUntilAiring
                    episode
                }
            }
        }
    }
"#;

/// Fetch one media entry by id.
pub const MEDIA_BY_ID: &str = r#"
    query ($id: Int) {
        Media (id: $id) {
            title {
                romaji
                english
            }
            coverImage {
                extraLarge
            }
            bannerImage
            episodes
            status
            description
            seasonYear
            popularity
            averageScore
            genres
            nextAiringEpisode {
                airingAt
                timeUntilAiring
                episode
            }
        }
    }
"#;

/// Paged listing, trending first.
pub const TRENDING_MEDIA: &str = r#"
    query ($page: Int, $perPage: Int) {
        Page(page: $page, perPage: $perPage) {
            pageInfo {
                total
                currentPage
                lastPage
                hasNextPage
            }
            media(sort: TRENDING_DESC, type: ANIME) {
                id
                title {
                    romaji
                    english
                }
                coverImage {
                    extraLarge
                }
                bannerImage
                episodes
                status
                description
                seasonYear
                averageScore
                genres
            }
        }
    }
"#;

/// Paged listing, most popular first.
pub const POPULAR_MEDIA: &str = r#"
    query ($page: Int, $perPage: Int) {
        Page(page: $page, perPage: $perPage) {
            pageInfo {
                total
                currentPage
                lastPage
                hasNextPage
            }
            media(sort: POPULARITY_DESC, type: ANIME) {
                id
                title {
                    romaji
                    english
                }
                coverImage {
                    extraLarge
                }
                bannerImage
                episodes
                status
                description
                seasonYear
                averageScore
                genres
            }
        }
    }
"#;

/// Paged listing of currently releasing shows, most recently updated
/// first.
pub const LATEST_MEDIA: &str = r#"
    query ($page: Int, $perPage: Int) {
        Page(page: $page, perPage: $perPage) {
            pageInfo {
                total
                currentPage
                lastPage
                hasNextPage
            }
            media(sort: UPDATED_AT_DESC, type: ANIME, status: RELEASING, isAdult: false) {
                id
                title {
                    romaji
                    english
                }
                coverImage {
                    extraLarge
                }
                bannerImage
                episodes
                status
                description
                seasonYear
                averageScore
                genres
            }
        }
    }
"#;

/// Authenticated viewer profile.
pub const VIEWER: &str = r#"
    query {
        Viewer {
            id
            name
            avatar {
                medium
            }
        }
    }
"#;

/// Authenticated viewer id only.
pub const VIEWER_ID: &str = r#"
    query {
        Viewer {
            id
        }
    }
"#;

/// The viewer's currently-watching list.
pub const CONTINUE_WATCHING: &str = r#"
    query ($userId: Int) {
        MediaListCollection(userId: $userId, type: ANIME, status: CURRENT) {
            lists {
                entries {
                    id
                    progress
                    status
                    updatedAt
                    media {
                        id
                        title {
                            romaji
                            english
                        }
                        coverImage {
                            extraLarge
                        }
                        episodes
                        status
                        seasonYear
                    }
                }
            }
        }
    }
"#;

/// Save watch progress for a media entry.
pub const UPDATE_PROGRESS: &str = r#"
    mutation ($mediaId: Int, $progress: Int, $status: MediaListStatus) {
        SaveMediaListEntry (mediaId: $mediaId, progress: $progress, status: $status) {
            id
            progress
            status
            media {
                title {
                    romaji
                    english
                }
            }
        }
    }
"#;
