pub mod form_return;
