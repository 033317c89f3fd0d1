// Input record for account scoring.

use serde::{Deserialize, Serialize};

/// Observable attributes of a social media account.
///
/// Every field defaults when absent, so a partially filled JSON record still
/// deserializes: numbers to 0, flags to false, the username to empty. Keys
/// are accepted in snake_case, camelCase, or the short form names; any
/// other key is an error rather than a silently defaulted field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountFeatures {
    pub username: String,
    /// Display name (only sent to the remote classifier)
    #[serde(alias = "fullName")]
    pub full_name: String,
    #[serde(alias = "followers", alias = "followerCount")]
    pub follower_count: u64,
    #[serde(alias = "following", alias = "followingCount")]
    pub following_count: u64,
    #[serde(alias = "posts", alias = "postCount")]
    pub post_count: u64,
    /// Bio length in characters; a `bio` key may carry the text itself
    #[serde(alias = "bioLength", alias = "bio", deserialize_with = "bio_length")]
    pub bio_length: u64,
    #[serde(alias = "hasProfilePicture", alias = "has_profile_pic")]
    pub has_profile_picture: bool,
    #[serde(alias = "isVerified", alias = "verified")]
    pub is_verified: bool,
    #[serde(alias = "isPrivate", alias = "private")]
    pub is_private: bool,
    #[serde(alias = "hasExternalUrl", alias = "external_url")]
    pub has_external_url: bool,
    #[serde(alias = "avg_likes", alias = "averageLikes")]
    pub average_likes: f64,
    #[serde(alias = "avg_comments", alias = "averageComments")]
    pub average_comments: f64,
}

/// A bio given either as its length or as the text.
fn bio_length<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bio {
        Length(u64),
        Text(String),
    }

    Ok(match Bio::deserialize(deserializer)? {
        Bio::Length(n) => n,
        Bio::Text(text) => text.chars().count() as u64,
    })
}

impl AccountFeatures {
    /// Followers per followed account. Zero when the account follows nobody.
    pub fn follower_ratio(&self) -> f64 {
        if self.following_count == 0 {
            return 0.0;
        }
        self.follower_count as f64 / self.following_count as f64
    }

    /// Average likes plus comments as a percentage of followers.
    /// Zero when the account has no followers.
    pub fn engagement_rate(&self) -> f64 {
        if self.follower_count == 0 {
            return 0.0;
        }
        (self.average_likes + self.average_comments) / self.follower_count as f64 * 100.0
    }

    /// Number of ASCII digits in the username.
    pub fn username_digits(&self) -> usize {
        self.username.chars().filter(|c| c.is_ascii_digit()).count()
    }

    /// Username length in characters, not bytes.
    pub fn username_len(&self) -> usize {
        self.username.chars().count()
    }

    /// Fraction of the username made of digits (0.0 for an empty name).
    pub fn username_digit_density(&self) -> f64 {
        let len = self.username_len();
        if len == 0 {
            return 0.0;
        }
        self.username_digits() as f64 / len as f64
    }

    /// Number of whitespace-separated words in the display name.
    pub fn full_name_words(&self) -> usize {
        self.full_name.split_whitespace().count()
    }
}
