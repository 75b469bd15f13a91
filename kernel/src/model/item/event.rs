use derive_new::new;

#[derive(new)]
pub struct CreateItem {
    pub item_name: String,
    pub description: String,
}
