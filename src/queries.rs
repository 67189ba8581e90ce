//! query catalog
//!
//! immutable graphql documents per operation. paged documents wrap results in
//! the anilist `Page` type, alias it to `page`, and alias the list field to
//! `items` so every paged response deserializes into the same envelope.

/// parameters: `search: String`, `type: MediaType`, `page: Int`, `perPage: Int`
pub const SEARCH_MEDIA: &str = "\
query ($search: String, $type: MediaType, $page: Int, $perPage: Int) {
  page: Page(page: $page, perPage: $perPage) {
    pageInfo {
      total
      perPage
      currentPage
      lastPage
      hasNextPage
    }
    items: media(search: $search, type: $type, sort: SEARCH_MATCH) {
      id
      title {
        romaji
        english
        native
      }
      type
      format
      status
      episodes
      chapters
      averageScore
      coverImage {
        large
        medium
      }
      siteUrl
    }
  }
}
";

/// parameters: `name: String`
pub const GET_USER_BY_NAME: &str = "\
query ($name: String) {
  user: User(name: $name) {
    id
    name
    about(asHtml: true)
    avatar {
      large
      medium
    }
    bannerImage
    siteUrl
    donatorTier
    unreadNotificationCount
    updatedAt
  }
}
";

/// parameters: `search: String`, `page: Int`, `perPage: Int`
pub const SEARCH_USERS: &str = "\
query ($search: String, $page: Int, $perPage: Int) {
  page: Page(page: $page, perPage: $perPage) {
    pageInfo {
      total
      perPage
      currentPage
      lastPage
      hasNextPage
    }
    items: users(search: $search) {
      id
      name
      avatar {
        large
        medium
      }
      siteUrl
    }
  }
}
";

/// parameters: `search: String`, `page: Int`, `perPage: Int`
pub const SEARCH_CHARACTERS: &str = "\
query ($search: String, $page: Int, $perPage: Int) {
  page: Page(page: $page, perPage: $perPage) {
    pageInfo {
      total
      perPage
      currentPage
      lastPage
      hasNextPage
    }
    items: characters(search: $search) {
      id
      name {
        full
        native
      }
      image {
        large
        medium
      }
      siteUrl
    }
  }
}
";

/// parameters: `page: Int`, `perPage: Int`
pub const USER_ACTIVITY: &str = "\
query ($page: Int, $perPage: Int) {
  page: Page(page: $page, perPage: $perPage) {
    pageInfo {
      total
      perPage
      currentPage
      lastPage
      hasNextPage
    }
    items: activities(isFollowing: true, sort: ID_DESC) {
      ... on TextActivity {
        id
        type
        replyCount
        text
        createdAt
        user {
          id
          name
          avatar {
            large
          }
        }
      }
      ... on ListActivity {
        id
        type
        status
        progress
        createdAt
        user {
          id
          name
          avatar {
            large
          }
        }
        media {
          id
          title {
            romaji
            english
            native
          }
          siteUrl
        }
      }
    }
  }
}
";

/// parameters: `page: Int`, `perPage: Int`
pub const USER_NOTIFICATIONS: &str = "\
query ($page: Int, $perPage: Int) {
  page: Page(page: $page, perPage: $perPage) {
    pageInfo {
      total
      perPage
      currentPage
      lastPage
      hasNextPage
    }
    items: notifications {
      ... on AiringNotification {
        id
        type
        contexts
        createdAt
        episode
        media {
          id
          title {
            romaji
            english
            native
          }
          coverImage {
            large
            medium
          }
          siteUrl
        }
      }
      ... on FollowingNotification {
        id
        type
        context
        createdAt
        user {
          id
          name
          avatar {
            large
          }
        }
      }
      ... on ActivityMentionNotification {
        id
        type
        context
        createdAt
        activityId
        user {
          id
          name
          avatar {
            large
          }
        }
      }
      ... on ActivityLikeNotification {
        id
        type
        context
        createdAt
        activityId
        user {
          id
          name
          avatar {
            large
          }
        }
      }
    }
  }
}
";

/// parameters: `id: Int`, `type: LikeableType`
pub const TOGGLE_LIKE: &str = "\
mutation ($id: Int, $type: LikeableType) {
  likes: ToggleLike(id: $id, type: $type) {
    id
    name
    avatar {
      large
      medium
    }
    siteUrl
  }
}
";
