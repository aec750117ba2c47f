mod cheese_api;
mod cheese_pages;
