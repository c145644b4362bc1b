pub(crate) mod walking;
