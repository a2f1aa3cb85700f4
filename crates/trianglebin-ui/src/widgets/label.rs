use crate::context::Ui;

impl Ui<'_> {
    /// Read-only line of dimmed text.
    pub fn label(&mut self, text: impl Into<String>) {
        let row = self.next_row(self.ctx.style.item_height);
        let color = self.ctx.style.text_dim;
        self.painter().text_in(row, text, color);
    }
}
