use super::tag_vocabulary;

tag_vocabulary! {
    /// Every block `type` the renderer knows a template for.
    pub enum BlockType {
        Paragraph => "paragraph",
        Heading1 => "heading_1",
        Heading2 => "heading_2",
        Heading3 => "heading_3",
        BulletedListItem => "bulleted_list_item",
        NumberedListItem => "numbered_list_item",
        ToDo => "to_do",
        Toggle => "toggle",
        Quote => "quote",
        Callout => "callout",
        Code => "code",
        Equation => "equation",
        Divider => "divider",
        Breadcrumb => "breadcrumb",
        TableOfContents => "table_of_contents",
        Image => "image",
        Video => "video",
        File => "file",
        Pdf => "pdf",
        Audio => "audio",
        Bookmark => "bookmark",
        Embed => "embed",
        LinkPreview => "link_preview",
        ChildPage => "child_page",
        ChildDatabase => "child_database",
        LinkToPage => "link_to_page",
        Table => "table",
        TableRow => "table_row",
        ColumnList => "column_list",
        Column => "column",
        SyncedBlock => "synced_block",
        Template => "template",
    }
}

impl BlockType {
    /// Blocks whose payload may legitimately be absent.
    pub fn allows_missing_payload(&self) -> bool {
        matches!(self, BlockType::Divider)
    }

    /// Caption used for media blocks when the block has none.
    pub fn default_media_caption(&self) -> Option<&'static str> {
        match self {
            BlockType::Image => Some("Image"),
            BlockType::File => Some("File"),
            BlockType::Video => Some("Video"),
            BlockType::Pdf => Some("PDF"),
            BlockType::Audio => Some("Audio"),
            _ => None,
        }
    }
}
