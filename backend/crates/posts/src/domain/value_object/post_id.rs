use kernel::id::Id;

pub struct PostMarker;
pub type PostId = Id<PostMarker>;
