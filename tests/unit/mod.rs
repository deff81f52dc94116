mod alarm;
mod http;
mod support;
