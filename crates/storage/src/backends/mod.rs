pub mod memory;
pub mod supabase;
