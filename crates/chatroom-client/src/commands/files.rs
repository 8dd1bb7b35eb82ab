//! Uploads to the blob store.

use chrono::Utc;
use tracing::{info, warn};

use chatroom_shared::constants::IMAGE_PREFIX;
use chatroom_store::Blob;

use crate::client::ChatClient;
use crate::composer::PendingImage;
use crate::error::Result;
use crate::session::IdentityProvider;
use crate::settings::avatar_path;

/// Blob path for a message image: `images/{unix_millis}_{file_name}`.
pub fn image_path(file_name: &str) -> String {
    format!("{IMAGE_PREFIX}/{}_{file_name}", Utc::now().timestamp_millis())
}

impl<P: IdentityProvider> ChatClient<P> {
    /// Upload a message image and return its download URL.
    pub(crate) async fn upload_image(&self, image: &PendingImage) -> Result<String> {
        let blob = self.upload(&image_path(&image.file_name), &image.data).await?;
        Ok(blob.url)
    }

    /// Upload an avatar and put its URL into the open settings form.
    pub async fn upload_avatar(&mut self, file_name: &str, data: Vec<u8>) -> Result<String> {
        let result = async {
            let image = PendingImage::new(file_name, data)?;
            self.upload(&avatar_path(&image.file_name), &image.data).await
        }
        .await;
        let blob = super::logged("upload-avatar", result)?;

        let settings = self.state.settings.clone();
        self.state
            .settings_form
            .get_or_insert_with(|| crate::settings::SettingsForm::seeded(&settings))
            .set_avatar_url(&blob.url);
        Ok(blob.url)
    }

    async fn upload(&self, path: &str, data: &[u8]) -> Result<Blob> {
        let blob = self.blobs.upload(path, data).await?;
        // catalogue entry is bookkeeping only
        if let Err(e) = self.store.record_blob(&blob) {
            warn!(path = %blob.path, error = %e, "Could not record blob metadata");
        }
        info!(path = %blob.path, size = blob.file_size, "Upload complete");
        Ok(blob)
    }
}
