use super::tag_vocabulary;

tag_vocabulary! {
    /// Property `type` tags, shared by page values and database schemas.
    pub enum PropertyType {
        Title => "title",
        RichText => "rich_text",
        Number => "number",
        Select => "select",
        MultiSelect => "multi_select",
        Status => "status",
        Date => "date",
        People => "people",
        Files => "files",
        Checkbox => "checkbox",
        Url => "url",
        Email => "email",
        PhoneNumber => "phone_number",
        Formula => "formula",
        Relation => "relation",
        Rollup => "rollup",
        CreatedTime => "created_time",
        CreatedBy => "created_by",
        LastEditedTime => "last_edited_time",
        LastEditedBy => "last_edited_by",
        UniqueId => "unique_id",
        Verification => "verification",
    }
}
