pub(crate) mod split;
pub(crate) mod timing;
pub(crate) mod track;
