//! Remediation instructions for a fresh Supabase project

use crate::environment::{NEXT_KEY_VAR, NEXT_URL_VAR, VITE_KEY_VAR, VITE_URL_VAR};
use crate::supabase::{AUDIO_BUCKET, PHOTOS_BUCKET};

const DASHBOARD_URL: &str = "https://supabase.com/dashboard/project";

/// Project reference of a hosted project URL (`https://<ref>.supabase.co`)
pub fn project_ref(url: &str) -> Option<&str> {
    let host = url
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .split(['/', ':'])
        .next()?;
    host.strip_suffix(".supabase.co")
        .filter(|project| !project.is_empty() && !project.contains('.'))
}

/// Setup instructions for the project at `project_url`.
///
/// Pure: the same URL always yields byte-identical text.
pub fn setup_instructions(project_url: &str) -> String {
    // "_" lets the dashboard ask which project to open
    let project = project_ref(project_url).unwrap_or("_");
    let url = project_url.trim_end_matches('/');

    format!(
        r#"
# Supabase Setup Instructions for MyLifePictures.ai

## 1. Environment Variables
# For Vite applications (RECOMMENDED):
{VITE_URL_VAR}={url}
{VITE_KEY_VAR}=your-anon-key-here

# Alternative (for compatibility):
{NEXT_URL_VAR}={url}
{NEXT_KEY_VAR}=your-anon-key-here

# API keys: {DASHBOARD_URL}/{project}/settings/api

## 2. Email Configuration (CRITICAL for sign-up)
1. Go to: {DASHBOARD_URL}/{project}/auth/settings
2. Scroll to "SMTP Settings"
3. Either:
   - Configure custom SMTP (recommended for production)
   - OR disable "Enable email confirmations" for testing

## 3. Storage Buckets
1. Go to: {DASHBOARD_URL}/{project}/storage/buckets
2. Create "{PHOTOS_BUCKET}" bucket (public)
3. Create "{AUDIO_BUCKET}" bucket (public)

## 4. Database Schema
- Tables will be created automatically via migrations
- Uses 'profiles' table (not 'users')
- No manual setup required
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_ref_from_hosted_url() {
        assert_eq!(
            project_ref("https://zvxnsjsltabvsfwatqox.supabase.co"),
            Some("zvxnsjsltabvsfwatqox")
        );
        assert_eq!(project_ref("https://abc.supabase.co/"), Some("abc"));
        assert_eq!(project_ref("http://localhost:54321"), None);
        assert_eq!(project_ref("https://db.example.com"), None);
    }

    #[test]
    fn test_instructions_are_stable() {
        let url = "https://zvxnsjsltabvsfwatqox.supabase.co";
        let first = setup_instructions(url);
        let second = setup_instructions(url);

        assert_eq!(first.as_bytes(), second.as_bytes());
        assert!(first.contains("VITE_SUPABASE_URL=https://zvxnsjsltabvsfwatqox.supabase.co"));
        assert!(first.contains(
            "https://supabase.com/dashboard/project/zvxnsjsltabvsfwatqox/storage/buckets"
        ));
        assert!(first.contains("Create \"photos\" bucket (public)"));
    }

    #[test]
    fn test_self_hosted_url_uses_project_picker() {
        let text = setup_instructions("http://localhost:54321");
        assert!(text.contains("https://supabase.com/dashboard/project/_/auth/settings"));
        assert!(text.contains("NEXT_PUBLIC_SUPABASE_URL=http://localhost:54321"));
    }
}
