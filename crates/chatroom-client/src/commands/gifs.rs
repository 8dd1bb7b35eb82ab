use tracing::debug;

use chatroom_store::Message;

use crate::client::ChatClient;
use crate::error::Result;
use crate::session::IdentityProvider;

impl<P: IdentityProvider> ChatClient<P> {
    pub fn open_gif_picker(&mut self) {
        self.state.gif_picker.open();
    }

    pub fn close_gif_picker(&mut self) {
        self.state.gif_picker.close();
    }

    /// Search Giphy for `term` and fill the picker. A blank term does
    /// nothing. Failures end up in the picker's error dialog, not here.
    /// Returns the number of results shown.
    pub async fn search_gifs(&mut self, term: &str) -> usize {
        self.state.gif_picker.open();
        self.state.gif_picker.term = term.to_string();
        let Some(term) = self.state.gif_picker.search_term().map(str::to_string) else {
            debug!("Blank GIF search ignored");
            return 0;
        };

        let outcome = self.giphy.search(&term).await;
        self.state.gif_picker.apply_results(outcome);
        self.state.gif_picker.results.len()
    }

    /// Send the picked result as a GIF message along with any draft.
    pub async fn pick_gif(&mut self, index: usize) -> Result<Option<Message>> {
        let Some(url) = self.state.gif_picker.pick(index).map(str::to_string) else {
            return Ok(None);
        };
        self.state.composer.pending_gif = Some(url);
        let sent = self.send().await;
        if sent.is_err() {
            // a GIF that failed to send is not kept as a draft
            self.state.composer.pending_gif = None;
        }
        sent
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::signed_in_with_channel;
    use crate::gif::{parse_response, GifResult};

    fn result(id: &str) -> GifResult {
        GifResult {
            id: id.into(),
            title: String::new(),
            preview_url: format!("https://media.giphy.com/{id}/200w.gif"),
            original_url: format!("https://media.giphy.com/{id}/giphy.gif"),
        }
    }

    #[tokio::test]
    async fn test_blank_search_is_noop() {
        let (mut client, _dir) = signed_in_with_channel("general").await;
        assert_eq!(client.search_gifs("   ").await, 0);
        assert!(client.state().gif_picker.error.is_none());
    }

    #[tokio::test]
    async fn test_pick_sends_original_and_closes_picker() {
        let (mut client, _dir) = signed_in_with_channel("general").await;
        client.open_gif_picker();
        client.state_mut().gif_picker.term = "cat".into();
        client
            .state_mut()
            .gif_picker
            .apply_results(Ok(vec![result("a"), result("b")]));

        let sent = client.pick_gif(1).await.unwrap().unwrap();
        assert_eq!(sent.gif_url.as_deref(), Some("https://media.giphy.com/b/giphy.gif"));
        assert!(sent.text.is_none());

        let picker = &client.state().gif_picker;
        assert!(!picker.open);
        assert!(picker.term.is_empty());
        assert!(picker.results.is_empty());
        assert!(client.state().composer.pending_gif.is_none());
    }

    #[tokio::test]
    async fn test_pick_out_of_range_does_nothing() {
        let (mut client, _dir) = signed_in_with_channel("general").await;
        client
            .state_mut()
            .gif_picker
            .apply_results(parse_response(r#"{"data": []}"#));
        assert!(client.pick_gif(0).await.unwrap().is_none());
    }
}
